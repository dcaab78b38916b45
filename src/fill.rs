use image::{Rgb, Rgba, RgbaImage};

/// Draw `image` over an opaque canvas of `color` (source-over).
///
/// The result is fully opaque; transparent pixels take the fill color and
/// partially transparent ones are blended with it.
pub fn fill_background(image: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let (w, h) = image.dimensions();
    let Rgb(bg) = color;
    let mut out = RgbaImage::new(w, h);

    for (src_px, out_px) in image.pixels().zip(out.pixels_mut()) {
        let alpha = f32::from(src_px[3]) / 255.0;
        let mut rgba = [0, 0, 0, 255];
        for c in 0..3 {
            let blended = f32::from(src_px[c]) * alpha + f32::from(bg[c]) * (1.0 - alpha);
            rgba[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        *out_px = Rgba(rgba);
    }

    out
}
