use serde::Serialize;
use std::path::PathBuf;

use anyhow::Context;
use rollshift_cli::load_config;
use rollshift_core::decoders::decode_image;
use rollshift_core::pipeline::{base_sample_count, compute_stats, estimate_base};
use rollshift_core::{BaseColor, RgbImage};

/// Analysis result structure for JSON output.
#[derive(Serialize)]
pub struct AnalysisResult {
    pub file: String,
    pub dimensions: [u32; 2],
    pub base: BaseColor,
    pub sample_percent: f32,
    pub sampled_pixels: usize,
    pub channel_stats: ChannelStats,
}

/// Per-channel (RGB) statistics for an image.
#[derive(Serialize)]
pub struct ChannelStats {
    pub red: ChannelStat,
    pub green: ChannelStat,
    pub blue: ChannelStat,
}

/// Statistics for a single color channel.
#[derive(Serialize)]
pub struct ChannelStat {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

fn channel_stats(image: &RgbImage) -> ChannelStats {
    let stat = |channel: usize| {
        let samples: Vec<f32> = image.data().iter().skip(channel).step_by(3).copied().collect();
        let (min, max, mean) = compute_stats(&samples);
        ChannelStat { min, max, mean }
    };
    ChannelStats {
        red: stat(0),
        green: stat(1),
        blue: stat(2),
    }
}

/// Estimate the film base of a negative.
///
/// The base can be saved as JSON and passed back to `convert`/`batch` with
/// `--base` so every frame of a roll shares it.
pub fn cmd_analyze(
    input: PathBuf,
    config: Option<PathBuf>,
    json_output: bool,
    save: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config.as_deref())?;
    let negative =
        decode_image(&input).with_context(|| format!("Failed to decode {}", input.display()))?;
    let base = estimate_base(&negative, config.base_sample_percent)?;

    let result = AnalysisResult {
        file: input.display().to_string(),
        dimensions: [negative.width(), negative.height()],
        base,
        sample_percent: config.base_sample_percent,
        sampled_pixels: base_sample_count(negative.pixel_count(), config.base_sample_percent),
        channel_stats: channel_stats(&negative),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let [r, g, b] = base.rgb();
        println!("File: {}", result.file);
        println!("Dimensions: {}x{}", result.dimensions[0], result.dimensions[1]);
        println!(
            "Base (RGB): [{:.2}, {:.2}, {:.2}] from the brightest {}% ({} pixels)",
            r, g, b, result.sample_percent, result.sampled_pixels
        );
        println!("Use with: --base {:.1},{:.1},{:.1}", r, g, b);
        for (name, stat) in [
            ("Red", &result.channel_stats.red),
            ("Green", &result.channel_stats.green),
            ("Blue", &result.channel_stats.blue),
        ] {
            println!(
                "  {:<5} min {:>6.1}  max {:>6.1}  mean {:>6.1}",
                name, stat.min, stat.max, stat.mean
            );
        }
    }

    if let Some(path) = save {
        let json = serde_json::to_string_pretty(&base)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved base to {}", path.display());
    }

    Ok(())
}
