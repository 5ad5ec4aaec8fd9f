use anyhow::{Context, Result};

/// One normalized bounding-box record from a YOLO label file.
///
/// All geometric fields are fractions of the image width/height;
/// `class_id` indexes the class list.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub class_id: usize,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

/// Absolute pixel-space box corners. Not clamped to the canvas; the
/// drawing primitives clip natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Annotation {
    /// Parses one whitespace-separated label line
    /// `class_index x_center y_center width height`.
    ///
    /// Trailing extra fields are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        let mut next_field = |name: &'static str| {
            fields
                .next()
                .with_context(|| format!("label line is missing the {name} field"))
        };

        let class_id = next_field("class index")?;
        let x_center = next_field("x_center")?;
        let y_center = next_field("y_center")?;
        let width = next_field("width")?;
        let height = next_field("height")?;

        Ok(Self {
            class_id: class_id
                .parse()
                .with_context(|| format!("invalid class index {class_id:?}"))?,
            x_center: parse_fraction(x_center)?,
            y_center: parse_fraction(y_center)?,
            width: parse_fraction(width)?,
            height: parse_fraction(height)?,
        })
    }

    /// Converts the normalized box to absolute pixel corners on an
    /// image of the given size.
    pub fn to_pixel_box(&self, image_width: i32, image_height: i32) -> PixelBox {
        let cx = self.x_center * image_width as f64;
        let cy = self.y_center * image_height as f64;
        let w = self.width * image_width as f64;
        let h = self.height * image_height as f64;

        PixelBox {
            x1: (cx - w / 2.0).round() as i32,
            y1: (cy - h / 2.0).round() as i32,
            x2: (cx + w / 2.0).round() as i32,
            y2: (cy + h / 2.0).round() as i32,
        }
    }
}

fn parse_fraction(field: &str) -> Result<f64> {
    field
        .parse()
        .with_context(|| format!("invalid coordinate field {field:?}"))
}
