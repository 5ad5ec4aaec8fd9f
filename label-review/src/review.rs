use crate::{
    config::Config,
    dataset::{self, Cursor},
};
use anyhow::{ensure, Context, Result};
use label_draw::{color, draw_boxes_on_image, Frame};
use log::{info, warn};
use opencv::{core::Vector, highgui, imgcodecs, prelude::*};
use std::{
    fs,
    io::{self, Read},
};

const WINDOW_NAME: &str = "Viewer";

const KEY_ESC: i32 = 27;
const KEY_DELETE: i32 = b'd' as i32;
const KEY_STEP_BACK: i32 = b'j' as i32;

/// Operator decision for the frame at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Terminate the loop.
    Quit,
    /// Remove the saved output of the current image, then advance.
    Delete,
    /// Re-inspect the previous image; nothing is saved.
    StepBack,
    /// Save the frame (when saving is enabled) and advance.
    Accept,
}

/// Maps one captured key code to a review action. Any key without a
/// dedicated binding accepts the frame.
pub fn action_for_key(key: i32) -> Action {
    match key {
        KEY_ESC => Action::Quit,
        KEY_DELETE => Action::Delete,
        KEY_STEP_BACK => Action::StepBack,
        _ => Action::Accept,
    }
}

/// Running totals, bumped only on accept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Totals {
    pub boxes: usize,
    pub images: usize,
}

/// Cursor, totals and filesystem side effects of the review loop, kept
/// apart from the GUI so transitions can be exercised directly.
pub struct ReviewSession<'a> {
    config: &'a Config,
    enable_save: bool,
    names: Vec<String>,
    cursor: Cursor,
    totals: Totals,
}

impl<'a> ReviewSession<'a> {
    pub fn new(config: &'a Config, enable_save: bool, names: Vec<String>) -> Self {
        let cursor = Cursor::new(names.len());
        Self {
            config,
            enable_save,
            names,
            cursor,
            totals: Totals::default(),
        }
    }

    /// Name at the cursor, transparently skipping filesystem
    /// artifacts. None once the list is exhausted.
    pub fn current(&mut self) -> Option<String> {
        while let Some(index) = self.cursor.get() {
            let name = &self.names[index];
            if dataset::is_artifact(name) {
                self.cursor.advance();
                continue;
            }
            return Some(name.clone());
        }
        None
    }

    /// Moves past an entry whose raster could not be read.
    pub fn skip_unreadable(&mut self) {
        self.cursor.advance();
    }

    /// Applies the operator's decision for the named frame. Returns
    /// false once the loop should stop.
    ///
    /// The save path is derived from `name` before the cursor moves,
    /// so a delete can never touch a neighbouring image's file.
    pub fn apply(&mut self, action: Action, name: &str, image: &Mat, box_count: usize) -> Result<bool> {
        match action {
            Action::Quit => return Ok(false),
            Action::Delete => {
                let save_path = self.config.save_path(name);
                match fs::remove_file(&save_path) {
                    Ok(()) => info!("deleted {}", save_path.display()),
                    Err(err) => warn!("cannot delete {}: {}", save_path.display(), err),
                }
                self.cursor.advance();
            }
            Action::StepBack => self.cursor.step_back(),
            Action::Accept => {
                if self.enable_save {
                    let save_path = self.config.save_path(name);
                    fs::create_dir_all(&self.config.save_images_folder).with_context(|| {
                        format!("cannot create {}", self.config.save_images_folder.display())
                    })?;
                    let written =
                        imgcodecs::imwrite(&save_path.to_string_lossy(), image, &Vector::new())?;
                    ensure!(written, "cannot write {}", save_path.display());
                }
                self.totals.boxes += box_count;
                self.totals.images += 1;
                self.cursor.advance();
            }
        }
        Ok(true)
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

/// Steps through the dataset one image at a time: build the frame,
/// present it (when viewing is enabled), block on one keystroke, apply
/// the action. Ends on ESC or when the name list is exhausted.
pub fn run(config: &Config, enable_view: bool, enable_save: bool) -> Result<()> {
    let names = dataset::make_name_list(&config.raw_images_folder, &config.name_list_path)?;
    let classes = dataset::load_classes(&config.classes_path)?;
    let colors = color::class_colors(classes.len());

    let mut session = ReviewSession::new(config, enable_save, names);

    while let Some(name) = session.current() {
        let image_path = config.image_path(&name);
        let label_path = config.label_path(&name);

        let frame = draw_boxes_on_image(&image_path, &label_path, &classes, &colors)?;
        let (image, box_count) = match frame {
            Frame::Rendered { image, box_count } => (image, box_count),
            Frame::Unreadable => {
                session.skip_unreadable();
                continue;
            }
        };

        if enable_view {
            highgui::imshow(WINDOW_NAME, &image)?;
        }

        let key = read_key(enable_view)?;
        if !session.apply(action_for_key(key), &name, &image, box_count)? {
            break;
        }
    }

    if enable_view {
        highgui::destroy_all_windows()?;
    }

    let totals = session.totals();
    info!(
        "accepted {} images with {} boxes in total",
        totals.images, totals.boxes
    );
    Ok(())
}

/// Blocks until the operator presses one key: through the highgui
/// window when viewing is enabled, from stdin otherwise. The loop
/// always waits once per image, decoupling the view and save policies.
fn read_key(enable_view: bool) -> Result<i32> {
    if enable_view {
        Ok(highgui::wait_key(0)?)
    } else {
        next_key_byte(&mut io::stdin())
    }
}

/// Next key byte from the reader. Line-buffered terminals deliver the
/// Enter that flushed the line as an extra byte; line terminators are
/// never keys, so they are skipped rather than handed to the action
/// mapping.
fn next_key_byte(reader: &mut impl Read) -> Result<i32> {
    loop {
        let mut byte = [0u8; 1];
        reader
            .read_exact(&mut byte)
            .context("stdin closed while waiting for a key")?;
        if byte[0] != b'\n' && byte[0] != b'\r' {
            return Ok(i32::from(byte[0]));
        }
    }
}
