//! fOS Icon demo - renders a sample icon to PNG or JPEG
//!
//! Usage: fos-icon-demo [OUTPUT] [WIDTH] [HEIGHT]
//! WIDTH/HEIGHT below 1 (or omitted) mean "natural size" / "keep aspect".

use anyhow::Context;
use fos_icon::{
    Color, Fill, GradientStop, Icon, IconPath, LinearGradient, PathCommand, RenderSize, StrokeStyle, ViewBox,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "icon.png".to_string());
    let width = parse_dimension(args.next())?;
    let height = parse_dimension(args.next())?;

    let icon = sample_icon();
    let size = RenderSize::from_sentinel(&icon.view_box, width, height);
    tracing::info!(%output, ?size, "rendering sample icon");

    let warnings = icon
        .save_as(&output, size)
        .with_context(|| format!("failed to save {output}"))?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    Ok(())
}

fn parse_dimension(arg: Option<String>) -> anyhow::Result<f32> {
    match arg {
        Some(value) => value.parse().with_context(|| format!("invalid dimension: {value}")),
        None => Ok(-1.0),
    }
}

/// Rounded badge with a check mark
fn sample_icon() -> Icon {
    let badge = IconPath::new(vec![
        PathCommand::MoveTo(8.0, 2.0),
        PathCommand::HorizontalTo(40.0),
        PathCommand::QuadTo(46.0, 2.0, 46.0, 8.0),
        PathCommand::VerticalTo(40.0),
        PathCommand::QuadTo(46.0, 46.0, 40.0, 46.0),
        PathCommand::HorizontalTo(8.0),
        PathCommand::QuadTo(2.0, 46.0, 2.0, 40.0),
        PathCommand::VerticalTo(8.0),
        PathCommand::QuadTo(2.0, 2.0, 8.0, 2.0),
        PathCommand::Close,
    ])
    .with_fill(Fill::Gradient("badge".into()))
    .with_stroke(StrokeStyle::solid(Color::rgb(20, 60, 120), 1.5));

    let check = IconPath::new(vec![
        PathCommand::MoveTo(14.0, 25.0),
        PathCommand::LineTo(21.0, 32.0),
        PathCommand::LineTo(35.0, 16.0),
    ])
    .without_fill()
    .with_stroke(StrokeStyle::solid(Color::WHITE, 4.0));

    Icon::new(ViewBox::new(0.0, 0.0, 48.0, 48.0))
        .with_title("fOS badge")
        .with_description("Rounded badge with a check mark")
        .with_gradient(
            "badge",
            LinearGradient::new(
                0.0,
                0.0,
                0.0,
                48.0,
                vec![
                    GradientStop::new(0.0, Color::rgb(90, 170, 255)),
                    GradientStop::new(1.0, Color::rgb(30, 90, 200)),
                ],
            ),
        )
        .with_path(badge)
        .with_path(check.with_opacity(0.9))
}
