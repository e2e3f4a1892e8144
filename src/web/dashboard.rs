//! Dashboard shell: a two-column page whose control panel drives generation
//! through a JSON API. The gateway is initialized lazily, on the first
//! status probe after page load.

use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Serialize;
use uuid::Uuid;

use crate::config::{Config, GatewayConfig};
use crate::diffusion::{self, ImageSynthesizer};
use crate::generation;
use crate::models::{
    GenerationRequest, DEFAULT_STEPS, DEFAULT_TOPIC, MAX_STEPS, MIN_STEPS, STEPS_INCREMENT,
};

pub struct DashboardState {
    pub gateway: GatewayConfig,
}

#[derive(Serialize)]
struct StatusResponse {
    ready: bool,
    model: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    image_base64: String,
    caption: String,
    model: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let port = config.port.unwrap_or(8080);
    let state = web::Data::new(DashboardState {
        gateway: config.gateway(),
    });

    log::info!("🌐 Dashboard listening on http://127.0.0.1:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .route("/api/status", web::get().to(status))
            .route("/api/generate", web::post().to(generate))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page())
}

/// One-time lazy gateway initialization; the page polls this until ready.
async fn status(state: web::Data<DashboardState>) -> HttpResponse {
    match diffusion::shared(&state.gateway).await {
        Ok(client) => HttpResponse::Ok().json(StatusResponse {
            ready: true,
            model: client.model().to_string(),
        }),
        Err(err) => {
            log::error!("❌ Gateway initialization failed: {}", err);
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: err.to_string(),
            })
        }
    }
}

async fn generate(
    state: web::Data<DashboardState>,
    payload: web::Json<GenerationRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    let request_id = Uuid::new_v4();

    if let Err(err) = generation::validate(&request) {
        log::warn!("🚫 [{}] Rejected request: {}", request_id, err);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: err.to_string(),
        });
    }

    let gateway = match diffusion::shared(&state.gateway).await {
        Ok(gateway) => gateway,
        Err(err) => {
            log::error!("❌ [{}] Gateway unavailable: {}", request_id, err);
            return HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: err.to_string(),
            });
        }
    };

    log::info!(
        "📨 [{}] '{}' ({}, {} steps)",
        request_id,
        request.topic.trim(),
        request.style,
        request.clamped_steps()
    );

    match generation::illustrate(gateway, &request).await {
        Ok(image) => HttpResponse::Ok().json(GenerateResponse {
            image_base64: image.to_base64(),
            caption: super::caption(&request.topic, &request.style),
            model: image.model,
        }),
        Err(err) => {
            log::error!("❌ [{}] Generation failed: {}", request_id, err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: err.to_string(),
            })
        }
    }
}

fn render_page() -> String {
    PAGE_TEMPLATE
        .replace("{{topic}}", &super::escape_html(DEFAULT_TOPIC))
        .replace("{{style_options}}", &super::style_options(""))
        .replace("{{min_steps}}", &MIN_STEPS.to_string())
        .replace("{{max_steps}}", &MAX_STEPS.to_string())
        .replace("{{steps_increment}}", &STEPS_INCREMENT.to_string())
        .replace("{{default_steps}}", &DEFAULT_STEPS.to_string())
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>EduImagina AI</title>
<style>
  body { background-color: #f0f2f6; font-family: "Segoe UI", sans-serif; margin: 0; }
  h1 { color: #2c3e50; }
  header { padding: 1.5rem 2rem 0; }
  .layout { display: flex; gap: 2rem; padding: 2rem; align-items: flex-start; }
  .panel { background: #ffffff; border-radius: 10px; padding: 1.5rem; box-shadow: 0 1px 4px rgba(0,0,0,0.08); }
  .controls { flex: 1; }
  .result { flex: 2; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input[type=text], select { width: 100%; padding: 0.4rem; margin-top: 0.3rem; box-sizing: border-box; }
  input[type=range] { width: 100%; margin-top: 0.3rem; }
  button {
    background-color: #4CAF50;
    color: white;
    border-radius: 10px;
    padding: 0.4rem 1rem;
    border: none;
    cursor: pointer;
    margin-top: 1.2rem;
  }
  button:disabled { background-color: #9e9e9e; cursor: default; }
  .note { background: #e8f0fe; padding: 0.6rem; border-radius: 6px; font-size: 0.9rem; margin-top: 1rem; }
  .status { margin-bottom: 1rem; color: #555; }
  .error { color: #b71c1c; white-space: pre-wrap; }
  .success { color: #2e7d32; }
  img { max-width: 100%; border-radius: 6px; }
</style>
</head>
<body>
<header>
  <h1>EduImagina: Ilustrador de Conceptos Educativos</h1>
  <p>Herramienta de apoyo docente para generar material visual didáctico mediante Inteligencia Artificial.</p>
</header>
<div class="layout">
  <div class="panel controls">
    <h2>Panel de Control</h2>
    <label for="topic">Concepto a ilustrar</label>
    <input type="text" id="topic" value="{{topic}}">
    <label for="style">Estilo gráfico</label>
    <select id="style">
{{style_options}}
    </select>
    <label for="steps">Calidad (Pasos): <span id="steps-value">{{default_steps}}</span></label>
    <input type="range" id="steps" min="{{min_steps}}" max="{{max_steps}}" step="{{steps_increment}}" value="{{default_steps}}">
    <div class="note">Nota: Verifique siempre la precisión científica de las imágenes generadas antes de usarlas en clase.</div>
    <button id="generate" disabled>Generar Imagen</button>
  </div>
  <div class="panel result">
    <h2>Visualización</h2>
    <div class="status" id="status"></div>
    <div id="output"></div>
  </div>
</div>
<script>
  const topicEl = document.getElementById('topic');
  const styleEl = document.getElementById('style');
  const stepsEl = document.getElementById('steps');
  const stepsValueEl = document.getElementById('steps-value');
  const buttonEl = document.getElementById('generate');
  const statusEl = document.getElementById('status');
  const outputEl = document.getElementById('output');

  let engineReady = false;

  stepsEl.addEventListener('input', () => { stepsValueEl.textContent = stepsEl.value; });
  topicEl.addEventListener('input', updateButton);

  function updateButton() {
    buttonEl.disabled = !engineReady || topicEl.value.trim() === '';
  }

  async function waitForEngine() {
    statusEl.textContent = 'Inicializando el motor de IA... (Esto puede tardar unos minutos la primera vez)';
    try {
      const response = await fetch('/api/status');
      if (response.ok) {
        const body = await response.json();
        statusEl.textContent = 'Motor listo (' + body.model + ').';
        engineReady = true;
        updateButton();
        return;
      }
      const body = await response.json();
      statusEl.innerHTML = '<span class="error">Error al inicializar: ' + body.error + '</span>';
    } catch (err) {
      statusEl.innerHTML = '<span class="error">Error al inicializar: ' + err + '</span>';
    }
    setTimeout(waitForEngine, 5000);
  }

  buttonEl.addEventListener('click', async () => {
    const topic = topicEl.value;
    buttonEl.disabled = true;
    outputEl.innerHTML = '';
    statusEl.textContent = "Dibujando '" + topic.trim() + "'... Por favor espere.";
    try {
      const response = await fetch('/api/generate', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ topic: topic, style: styleEl.value, steps: Number(stepsEl.value) }),
      });
      const body = await response.json();
      if (response.ok) {
        statusEl.innerHTML = '<span class="success">Imagen generada con éxito.</span>';
        const img = document.createElement('img');
        img.src = 'data:image/png;base64,' + body.image_base64;
        const figcaption = document.createElement('p');
        figcaption.textContent = body.caption;
        outputEl.appendChild(img);
        outputEl.appendChild(figcaption);
      } else {
        statusEl.innerHTML = '';
        outputEl.innerHTML = '<p class="error">Ocurrió un error durante la generación: ' + body.error + '</p>';
      }
    } catch (err) {
      outputEl.innerHTML = '<p class="error">Ocurrió un error durante la generación: ' + err + '</p>';
    }
    updateButton();
  });

  waitForEngine();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, TestRequest};

    #[test]
    fn test_page_renders_controls() {
        let page = render_page();
        assert!(page.contains("EduImagina"));
        assert!(page.contains("La fotosíntesis"));
        assert_eq!(page.matches("<option").count(), 4);
        assert!(page.contains("min=\"15\""));
        assert!(page.contains("max=\"50\""));
        assert!(page.contains("step=\"5\""));
        assert!(page.contains("value=\"30\""));
    }

    #[actix_web::test]
    async fn test_generate_rejects_blank_topic() {
        let state = web::Data::new(DashboardState {
            gateway: GatewayConfig::new(),
        });
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/api/generate", web::post().to(generate)),
        )
        .await;

        let request = TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({
                "topic": "   ",
                "style": "Arte Pixel (Retro)",
                "steps": 30
            }))
            .to_request();

        let response = call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generate_rejects_unknown_style() {
        let state = web::Data::new(DashboardState {
            gateway: GatewayConfig::new(),
        });
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/api/generate", web::post().to(generate)),
        )
        .await;

        let request = TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({
                "topic": "La fotosíntesis",
                "style": "Acuarela",
                "steps": 30
            }))
            .to_request();

        let response = call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
