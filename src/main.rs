use grid_overlay::config;
use grid_overlay::glyphs::{font_size_for_spacing, resolve_glyphs};
use grid_overlay::io::{load_image, save_png, write_json_file};
use grid_overlay::render::render_with_layout;
use grid_overlay::types::GridLayout;
use log::{debug, info};
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args
        .next()
        .unwrap_or_else(|| "grid_overlay".to_string());
    let args: Vec<String> = args.collect();
    if config::wants_help(&args) {
        println!("{}", config::usage(&program));
        return Ok(());
    }
    let config = config::parse_cli(&program, args)?;

    let filter = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    if config.debug {
        debug!("Debug mode enabled");
    }

    if !config.input.exists() {
        return Err(format!("Input file not found: {}", config.input.display()));
    }

    info!("Opening image: {}", config.input.display());
    let decoded = load_image(&config.input)?;
    debug!(
        "Image color type: {:?}, size: {}x{}",
        decoded.color(),
        decoded.width(),
        decoded.height()
    );
    // Grid strokes carry alpha, so composite in RGBA.
    let base = decoded.into_rgba8();

    let style = config.resolve_style();
    let layout = GridLayout::compute(base.width(), base.height(), style.spacing);
    info!(
        "Creating grid with {} rows and {} columns",
        layout.row_count(),
        layout.column_count()
    );
    info!(
        "Grid spacing: {}px, Line thickness: {}px",
        style.spacing, style.thickness
    );

    let glyphs = resolve_glyphs(font_size_for_spacing(style.spacing));
    let result = render_with_layout(&base, &style, &layout, glyphs.as_ref());

    if let Some(path) = &config.layout_json {
        write_json_file(path, &layout)?;
        info!("Grid layout written to {}", path.display());
    }

    let output = config.output_path();
    if config.output.is_none() {
        debug!("Using default output name: {}", output.display());
    }
    info!("Saving grid image to: {}", output.display());
    save_png(&result, &output)?;

    println!("Successfully created grid overlay: {}", output.display());
    Ok(())
}
