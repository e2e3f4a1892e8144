//! Form shell: a single declarative HTML form bound to one synchronous
//! handler. The gateway is constructed eagerly, before this server is
//! started.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;

use crate::config::Config;
use crate::diffusion::ImageSynthesizer;
use crate::generation;
use crate::models::{
    GeneratedImage, GenerationRequest, DEFAULT_STEPS, DEFAULT_TOPIC, MAX_STEPS, MIN_STEPS,
    STEPS_INCREMENT,
};

pub struct FormState {
    pub gateway: Arc<dyn ImageSynthesizer>,
}

#[derive(Debug, Deserialize)]
pub struct FormInput {
    pub topic: String,
    pub style: String,
    #[serde(default = "default_steps")]
    pub steps: u32,
}

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

pub async fn run(gateway: Arc<dyn ImageSynthesizer>, config: Config) -> std::io::Result<()> {
    let port = config.port.unwrap_or(8081);
    let state = web::Data::new(FormState { gateway });

    log::info!("🌐 Form demo listening on http://127.0.0.1:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .route("/generate", web::post().to(generate))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn index() -> HttpResponse {
    html_response(render_page(DEFAULT_TOPIC, "", DEFAULT_STEPS, None, None))
}

async fn generate(state: web::Data<FormState>, input: web::Form<FormInput>) -> HttpResponse {
    let input = input.into_inner();

    // Blank topic: no output, just the form again.
    if input.topic.trim().is_empty() {
        return html_response(render_page(&input.topic, &input.style, input.steps, None, None));
    }

    let request = GenerationRequest::new(input.topic.clone(), input.style.clone(), input.steps);

    match generation::illustrate(state.gateway.as_ref(), &request).await {
        Ok(image) => html_response(render_page(
            &input.topic,
            &input.style,
            request.clamped_steps(),
            Some(&image),
            None,
        )),
        Err(err) => {
            log::error!("❌ Generation failed: {}", err);
            html_response(render_page(
                &input.topic,
                &input.style,
                request.clamped_steps(),
                None,
                Some(&err.to_string()),
            ))
        }
    }
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn render_page(
    topic: &str,
    style: &str,
    steps: u32,
    result: Option<&GeneratedImage>,
    error: Option<&str>,
) -> String {
    let output = if let Some(image) = result {
        format!(
            "<figure><img src=\"{}\" alt=\"Resultado\"><figcaption>{}</figcaption></figure>",
            super::data_uri(image),
            super::escape_html(&super::caption(topic, style))
        )
    } else if let Some(message) = error {
        format!(
            "<p class=\"error\">Ocurrió un error durante la generación: {}</p>",
            super::escape_html(message)
        )
    } else {
        String::new()
    };

    PAGE_TEMPLATE
        .replace("{{topic}}", &super::escape_html(topic))
        .replace("{{style_options}}", &super::style_options(style))
        .replace("{{min_steps}}", &MIN_STEPS.to_string())
        .replace("{{max_steps}}", &MAX_STEPS.to_string())
        .replace("{{steps_increment}}", &STEPS_INCREMENT.to_string())
        .replace("{{steps}}", &steps.to_string())
        .replace("{{output}}", &output)
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>EduImagina: Ilustrador de Conceptos Educativos</title>
<style>
  body { background-color: #f0f2f6; font-family: "Segoe UI", sans-serif; margin: 0 auto; max-width: 720px; padding: 2rem; }
  h1 { color: #2c3e50; }
  form { background: #ffffff; border-radius: 10px; padding: 1.5rem; box-shadow: 0 1px 4px rgba(0,0,0,0.08); }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input[type=text], select { width: 100%; padding: 0.4rem; margin-top: 0.3rem; box-sizing: border-box; }
  input[type=range] { width: 100%; margin-top: 0.3rem; }
  button { background-color: #4CAF50; color: white; border-radius: 10px; padding: 0.4rem 1rem; border: none; cursor: pointer; margin-top: 1.2rem; }
  .error { color: #b71c1c; white-space: pre-wrap; }
  figure { margin: 1.5rem 0 0; }
  img { max-width: 100%; border-radius: 6px; }
</style>
</head>
<body>
<h1>EduImagina: Ilustrador de Conceptos Educativos</h1>
<p>Herramienta de apoyo docente para generar material visual didáctico a partir de texto.
Permite elegir el estilo gráfico y ajustar la calidad de la generación.</p>
<form method="post" action="/generate">
  <label for="topic">Concepto a ilustrar</label>
  <input type="text" id="topic" name="topic" value="{{topic}}">
  <label for="style">Estilo gráfico</label>
  <select id="style" name="style">
{{style_options}}
  </select>
  <label for="steps">Calidad (Pasos de inferencia)</label>
  <input type="range" id="steps" name="steps" min="{{min_steps}}" max="{{max_steps}}" step="{{steps_increment}}" value="{{steps}}">
  <button type="submit">Generar</button>
</form>
{{output}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffusion::testing::MockSynthesizer;
    use actix_web::test::{call_and_read_body, init_service, TestRequest};

    fn test_state(gateway: Arc<MockSynthesizer>) -> web::Data<FormState> {
        web::Data::new(FormState {
            gateway: gateway.clone(),
        })
    }

    #[test]
    fn test_page_renders_form() {
        let page = render_page(DEFAULT_TOPIC, "", DEFAULT_STEPS, None, None);
        assert!(page.contains("name=\"topic\""));
        assert!(page.contains("La fotosíntesis"));
        assert_eq!(page.matches("<option").count(), 4);
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_page_renders_error_block() {
        let page = render_page(
            "La fotosíntesis",
            "Arte Pixel (Retro)",
            30,
            None,
            Some("CUDA out of memory"),
        );
        assert!(page.contains("Ocurrió un error durante la generación: CUDA out of memory"));
    }

    #[actix_web::test]
    async fn test_blank_topic_returns_form_without_invoking_gateway() {
        let gateway = Arc::new(MockSynthesizer::new());
        let state = test_state(gateway.clone());
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/generate", web::post().to(generate)),
        )
        .await;

        let request = TestRequest::post()
            .uri("/generate")
            .set_form([("topic", "   "), ("style", "Arte Pixel (Retro)"), ("steps", "30")])
            .to_request();

        let body = call_and_read_body(&app, request).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("<img"));
        assert!(!body.contains("Ocurrió un error"));
        assert!(gateway.jobs().is_empty());
    }

    #[actix_web::test]
    async fn test_generation_renders_inline_image() {
        let state = test_state(Arc::new(MockSynthesizer::new()));
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/generate", web::post().to(generate)),
        )
        .await;

        let request = TestRequest::post()
            .uri("/generate")
            .set_form([
                ("topic", "La fotosíntesis"),
                ("style", "Libro de texto (Esquemático)"),
                ("steps", "30"),
            ])
            .to_request();

        let body = call_and_read_body(&app, request).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("data:image/png;base64,iVBORw=="));
        assert!(body.contains("Resultado: La fotosíntesis (Libro de texto (Esquemático))"));
    }

    #[actix_web::test]
    async fn test_gateway_failure_is_shown_not_fatal() {
        let state = test_state(Arc::new(MockSynthesizer::failing("CUDA out of memory")));
        let app = init_service(
            App::new()
                .app_data(state)
                .route("/generate", web::post().to(generate)),
        )
        .await;

        let request = TestRequest::post()
            .uri("/generate")
            .set_form([
                ("topic", "La fotosíntesis"),
                ("style", "Arte Pixel (Retro)"),
                ("steps", "30"),
            ])
            .to_request();

        let body = call_and_read_body(&app, request).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("CUDA out of memory"));
    }
}
