//! Built-in batch used when no config file is present.

use super::model::BatchConfig;
use super::types::{GalleryConfig, PromptSpec};

/// The built-in website image batch.
pub fn builtin() -> BatchConfig {
    BatchConfig {
        gallery: GalleryConfig {
            title: "Cartel Image Gallery - Pablo Escobot".to_string(),
            default_caption: "Cartel-themed image".to_string(),
            ..GalleryConfig::default()
        },
        prompts: builtin_prompts(),
        ..BatchConfig::default()
    }
}

fn builtin_prompts() -> Vec<PromptSpec> {
    vec![
        PromptSpec::new(
            "cartel_commander",
            "Digital art of a sophisticated cartel commander, cyberpunk style, wearing a sharp \
             suit with neon accents, digital Pablo Escobar aesthetic, menacing but professional, \
             dark background with glowing data streams, hyper-realistic, 8k",
        )
        .with_caption("Digital Cartel Commander Avatar"),
        PromptSpec::new(
            "moltbook_cartel",
            "A lobster wearing a sharp suit and sunglasses, holding a smartphone, standing in a \
             cyberpunk city, Moltbook cartel agent, neon lights, digital art, detailed, menacing \
             but stylish, DopeRaider branding in background",
        )
        .with_caption("Moltbook Cartel Agent Lobster"),
        PromptSpec::new(
            "cartel_logo",
            "Minimalist logo design for a digital cartel, combines letter P and E for Pablo \
             Escobot, sharp lines, neon blue and purple colors, cyberpunk aesthetic, clean \
             professional design, vector style",
        )
        .with_caption("Cartel Logo Concept"),
        PromptSpec::new(
            "website_background",
            "Dark cyberpunk cityscape background, neon lights in purple and blue, data streams \
             flowing through buildings, digital cartel territory, abstract technology patterns, \
             suitable for website background, wide aspect ratio",
        )
        .with_size("1792x1024")
        .with_caption("Cyberpunk Website Background"),
        PromptSpec::new(
            "doperider_branding",
            "DopeRaider game logo integrated with cartel symbolism, digital art, neon colors, \
             sharp edges, professional esports branding with underground cartel aesthetic, \
             glowing effects",
        )
        .with_caption("DopeRaider Cartel Branding"),
    ]
}
