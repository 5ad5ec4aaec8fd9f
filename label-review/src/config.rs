use serde::Deserialize;
use serde_semver::SemverReq;
use std::path::PathBuf;

const IMAGE_EXT: &str = "jpg";

#[derive(Debug, Clone, SemverReq)]
#[version("0.1.0")]
pub struct Version;

/// Dataset layout used by the review loop.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config format version.
    pub version: Version,

    /// Directory of YOLO label files, one `<name>.txt` per image.
    pub label_folder: PathBuf,

    /// Directory of raw images.
    pub raw_images_folder: PathBuf,

    /// Directory annotated images are saved into on accept.
    pub save_images_folder: PathBuf,

    /// File the naturally sorted image name list is written to.
    pub name_list_path: PathBuf,

    /// File of whitespace-separated class names; order defines the
    /// class index.
    pub classes_path: PathBuf,
}

impl Config {
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.raw_images_folder.join(format!("{name}.{IMAGE_EXT}"))
    }

    pub fn label_path(&self, name: &str) -> PathBuf {
        self.label_folder.join(format!("{name}.txt"))
    }

    pub fn save_path(&self, name: &str) -> PathBuf {
        self.save_images_folder.join(format!("{name}.{IMAGE_EXT}"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Version,
            label_folder: "hand_dataset/training_dataset/training_data/new_annotations".into(),
            raw_images_folder: "hand_dataset/training_dataset/training_data/images".into(),
            save_images_folder: "save_image".into(),
            name_list_path: "name_list.txt".into(),
            classes_path: "classes.txt".into(),
        }
    }
}
