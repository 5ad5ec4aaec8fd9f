use crate::{annotation::PixelBox, color::Rgb};
use anyhow::Result;
use opencv::{
    core::{Point, Rect, Scalar},
    imgproc,
    prelude::*,
};
use rand::Rng;

fn bgr(color: Rgb) -> Scalar {
    let [r, g, b] = color;
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

/// Draws one bounding-box outline and an optional class tag onto the
/// canvas in place.
///
/// When no colour is supplied, one is sampled at random per call. The
/// frame builder always supplies a colour-table entry; the random
/// fallback is only for ad-hoc callers.
pub fn plot_one_box(
    image: &mut Mat,
    bbox: PixelBox,
    color: Option<Rgb>,
    label: Option<&str>,
) -> Result<()> {
    // line/font thickness scaled to the canvas size
    let tl = (0.002 * (image.rows() + image.cols()) as f64 / 2.0).round() as i32 + 1;
    let color = bgr(color.unwrap_or_else(|| rand::thread_rng().gen()));

    // Rect spans exclude the bottom-right corner; widen by one pixel
    // so both corners sit on the outline
    let outline = Rect::new(
        bbox.x1,
        bbox.y1,
        bbox.x2 - bbox.x1 + 1,
        bbox.y2 - bbox.y1 + 1,
    );
    imgproc::rectangle(
        image,
        outline,
        color,
        1, // thickness
        imgproc::LINE_AA,
        0, // shift
    )?;

    if let Some(label) = label {
        let tf = (tl - 1).max(1);
        let mut baseline = 0;
        let text_size = imgproc::get_text_size(
            label,
            imgproc::FONT_HERSHEY_SIMPLEX,
            tl as f64 / 3.0,
            tf,
            &mut baseline,
        )?;

        // filled tag sized to the text, above the top-left corner
        let tag = Rect::new(
            bbox.x1,
            bbox.y1 - text_size.height - 3,
            text_size.width + 1,
            text_size.height + 4,
        );
        imgproc::rectangle(image, tag, color, imgproc::FILLED, imgproc::LINE_AA, 0)?;

        imgproc::put_text(
            image,
            label,
            Point::new(bbox.x1, bbox.y1 - 2),
            imgproc::FONT_HERSHEY_SIMPLEX,
            tl as f64 / 3.0,
            Scalar::new(225.0, 255.0, 255.0, 0.0),
            tf,
            imgproc::LINE_AA,
            false,
        )?;
    }

    Ok(())
}
