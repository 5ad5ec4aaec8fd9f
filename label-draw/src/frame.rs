use crate::{annotation::Annotation, color::Rgb, plot::plot_one_box};
use anyhow::{Context, Result};
use log::warn;
use opencv::{imgcodecs, prelude::*};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Outcome of annotating one image.
#[derive(Debug)]
pub enum Frame {
    /// The raster was loaded and every label line was drawn onto it.
    Rendered { image: Mat, box_count: usize },
    /// The raster file was missing or could not be decoded.
    Unreadable,
}

/// Loads the raster at `image_path` and draws every record of the label
/// file onto it, tagged with the matching class name and colour.
///
/// An unreadable raster is reported as [`Frame::Unreadable`] so the
/// caller can skip the entry; a missing label file or a malformed label
/// line is an error.
pub fn draw_boxes_on_image(
    image_path: &Path,
    label_path: &Path,
    classes: &[String],
    colors: &[Rgb],
) -> Result<Frame> {
    let mut image = imgcodecs::imread(&image_path.to_string_lossy(), imgcodecs::IMREAD_COLOR)?;
    if image.rows() == 0 || image.cols() == 0 {
        warn!("no image data in {}", image_path.display());
        return Ok(Frame::Unreadable);
    }

    let labels = File::open(label_path)
        .with_context(|| format!("cannot open label file {}", label_path.display()))?;

    let mut box_count = 0;
    for line in BufReader::new(labels).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = Annotation::parse(&line)
            .with_context(|| format!("malformed line {line:?} in {}", label_path.display()))?;
        let label = classes.get(record.class_id).with_context(|| {
            format!(
                "class index {} is out of range for {} classes",
                record.class_id,
                classes.len()
            )
        })?;
        let color = colors.get(record.class_id).copied();

        let bbox = record.to_pixel_box(image.cols(), image.rows());
        plot_one_box(&mut image, bbox, color, Some(label))?;
        box_count += 1;
    }

    Ok(Frame::Rendered { image, box_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::class_colors;
    use opencv::core::{Vector, CV_8UC3};
    use std::fs;
    use tempfile::TempDir;

    fn write_raster(path: &Path, rows: i32, cols: i32) {
        let image = Mat::zeros(rows, cols, CV_8UC3).unwrap().to_mat().unwrap();
        assert!(imgcodecs::imwrite(&path.to_string_lossy(), &image, &Vector::new()).unwrap());
    }

    fn classes() -> Vec<String> {
        vec!["hand".to_string(), "face".to_string()]
    }

    #[test]
    fn counts_one_box_per_non_empty_line() -> Result<()> {
        let dir = TempDir::new()?;
        let image_path = dir.path().join("a.jpg");
        let label_path = dir.path().join("a.txt");
        write_raster(&image_path, 200, 100);
        fs::write(&label_path, "0 0.5 0.5 0.2 0.4\n\n1 0.25 0.25 0.1 0.1\n")?;

        let frame = draw_boxes_on_image(&image_path, &label_path, &classes(), &class_colors(2))?;
        match frame {
            Frame::Rendered { image, box_count } => {
                assert_eq!(box_count, 2);
                assert_eq!(image.rows(), 200);
                assert_eq!(image.cols(), 100);
            }
            Frame::Unreadable => panic!("raster should be readable"),
        }
        Ok(())
    }

    #[test]
    fn missing_raster_is_reported_not_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        let frame = draw_boxes_on_image(
            &dir.path().join("ghost.jpg"),
            &dir.path().join("ghost.txt"),
            &classes(),
            &class_colors(2),
        )?;
        assert!(matches!(frame, Frame::Unreadable));
        Ok(())
    }

    #[test]
    fn missing_label_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("a.jpg");
        write_raster(&image_path, 50, 50);

        let result = draw_boxes_on_image(
            &image_path,
            &dir.path().join("a.txt"),
            &classes(),
            &class_colors(2),
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_label_line_is_an_error() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("a.jpg");
        let label_path = dir.path().join("a.txt");
        write_raster(&image_path, 50, 50);
        fs::write(&label_path, "0 0.5 bogus 0.2 0.4\n").unwrap();

        let result = draw_boxes_on_image(&image_path, &label_path, &classes(), &class_colors(2));
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_class_index_is_an_error() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("a.jpg");
        let label_path = dir.path().join("a.txt");
        write_raster(&image_path, 50, 50);
        fs::write(&label_path, "7 0.5 0.5 0.2 0.4\n").unwrap();

        let result = draw_boxes_on_image(&image_path, &label_path, &classes(), &class_colors(2));
        assert!(result.is_err());
    }
}
