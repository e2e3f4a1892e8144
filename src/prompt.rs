use crate::error::{EduImaginaError, Result};

/// One entry of the graphic style table: a user-facing label mapped to the
/// technical suffix appended to the topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub label: &'static str,
    pub suffix: &'static str,
}

pub const STYLES: [StyleEntry; 4] = [
    StyleEntry {
        label: "Libro de texto (Esquemático)",
        suffix: "educational diagram, white background, textbook style, isometric, clear labels, schematic",
    },
    StyleEntry {
        label: "Cartoon 3D (Estilo Pixar)",
        suffix: "pixar style, 3d render, cute, vibrant colors, soft lighting, 4k, high composition",
    },
    StyleEntry {
        label: "Fotorealista (Documental)",
        suffix: "national geographic photography, highly detailed, cinematic lighting, 8k, realistic texture",
    },
    StyleEntry {
        label: "Arte Pixel (Retro)",
        suffix: "pixel art, 16-bit, retro game style, clean lines",
    },
];

/// Suppressed artifact categories, identical for every request.
pub const NEGATIVE_PROMPT: &str = "distorted, blurry, text, watermark, violent, nudity, \
                                   deformed hands, bad anatomy, extra limbs, ugly, messy";

pub fn style_labels() -> Vec<&'static str> {
    STYLES.iter().map(|s| s.label).collect()
}

pub fn suffix_for(label: &str) -> Option<&'static str> {
    STYLES.iter().find(|s| s.label == label).map(|s| s.suffix)
}

/// A fully assembled prompt pair ready for the inference gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub positive: String,
    pub negative: &'static str,
}

/// Combine a topic with the suffix registered for `style_label`.
///
/// Plain concatenation, no escaping. The topic must be non-blank and the
/// label must come from the style table; both are normally guaranteed by
/// the UI layer before this is called.
pub fn compose(topic: &str, style_label: &str) -> Result<ComposedPrompt> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(EduImaginaError::InvalidInput(
            "topic must not be empty".into(),
        ));
    }

    let suffix = suffix_for(style_label).ok_or_else(|| {
        EduImaginaError::InvalidInput(format!("unknown style: {}", style_label))
    })?;

    Ok(ComposedPrompt {
        positive: format!("{}, {}", topic, suffix),
        negative: NEGATIVE_PROMPT,
    })
}
