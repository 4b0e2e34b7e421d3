use anyhow::{anyhow, Result};
use resvg::render;
use tiny_skia::{Pixmap, Transform};
use usvg::{Options, Tree};

use crate::utils::generate_qr_code;

/// Renders `payload` as a QR code PNG, ready to be sent as a photo.
pub fn render_qr_png(payload: &str) -> Result<Vec<u8>> {
    let svg = generate_qr_code(payload)?;
    convert_svg_to_png(&svg)
}

/// Converts SVG (as bytes) to PNG.
pub fn convert_svg_to_png(svg_data: &[u8]) -> Result<Vec<u8>> {
    let tree = Tree::from_data(svg_data, &Options::default())
        .map_err(|e| anyhow!("Error parsing SVG: {}", e))?;

    let size = tree.size();
    let (width, height) = (size.width() as u32, size.height() as u32);

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("Failed to create Pixmap"))?;
    render(&tree, Transform::default(), &mut pixmap.as_mut());

    // RGBA, 8 bits per channel
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }

    Ok(png_data)
}
