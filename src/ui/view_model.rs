//! Plain-data description of what the dog image component shows
//!
//! Everything the rendering contract says lives here, away from iced widgets,
//! so it can be checked without a window or a GPU.

use iced::widget::image::Handle;

use crate::state::fetch::FetchState;

/// Heading shown above the button
pub const TITLE: &str = "Procura a imagem do cachorro";
/// Button label while idle
pub const DEFAULT_BUTTON_LABEL: &str = "Fetch New Dog Image";
/// Button label while a fetch is in flight
pub const LOADING_BUTTON_LABEL: &str = "Loading...";

/// What goes into the image area
#[derive(Debug, Clone)]
pub enum ImageSlot {
    /// URL known, pixels still downloading (or the download failed)
    Pending,
    /// Pixels ready to draw
    Ready(Handle),
}

#[derive(Debug, Clone)]
pub struct ImageView {
    /// URL the picture comes from
    pub source: String,
    pub slot: ImageSlot,
}

/// Everything the component renders
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub title: &'static str,
    pub button_label: &'static str,
    /// False exactly while loading
    pub button_enabled: bool,
    /// "Error: ..." line, when there is an error
    pub error_text: Option<String>,
    /// Shown whenever there is an image URL, error or not
    pub image: Option<ImageView>,
}

impl ViewModel {
    /// Build the view model from the fetch state and the pixels for its image
    ///
    /// `pixels` must belong to the state's current image URL.
    pub fn new(state: &FetchState, pixels: Option<Handle>) -> Self {
        let loading = state.is_loading();

        let image = state.image().map(|source| ImageView {
            source: source.to_string(),
            slot: match pixels {
                Some(handle) => ImageSlot::Ready(handle),
                None => ImageSlot::Pending,
            },
        });

        ViewModel {
            title: TITLE,
            button_label: if loading { LOADING_BUTTON_LABEL } else { DEFAULT_BUTTON_LABEL },
            button_enabled: !loading,
            error_text: state.error().map(|error| format!("Error: {}", error)),
            image,
        }
    }
}
