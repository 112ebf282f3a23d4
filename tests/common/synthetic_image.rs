use image::{Rgba, RgbaImage};

/// Generates a single-color RGBA image.
pub fn solid_rgba(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// True if any pixel inside the given rectangle (clipped to the image)
/// matches `color` exactly.
pub fn region_contains(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 4]) -> bool {
    let (w, h) = img.dimensions();
    for y in y0..y1.min(h) {
        for x in x0..x1.min(w) {
            if img.get_pixel(x, y).0 == color {
                return true;
            }
        }
    }
    false
}
