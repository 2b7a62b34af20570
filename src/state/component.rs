//! The dog image component and the slot that mounts it
//!
//! `DogFetcher` owns the fetch state of one mounted instance and turns
//! messages into state changes plus follow-up tasks. `Slot` is where the host
//! keeps the mounted instance; it stamps every message with the instance id
//! so results that arrive after an unmount (or for an older instance) are
//! dropped instead of touching a component that no longer exists.

use iced::widget::image::Handle;
use iced::{Element, Task};
use tracing::{debug, info, warn};

use super::fetch::{FetchState, OverlapPolicy, Outcome, RequestId};
use crate::api::{client, DogApi};
use crate::error::FetchError;
use crate::ui::{self, ViewModel};

/// Events of a single component instance
#[derive(Debug, Clone)]
pub enum Message {
    /// User pressed the trigger button
    FetchRequested,
    /// A random image request finished
    Fetched(RequestId, Result<String, FetchError>),
    /// The pixels for `source` finished downloading
    PixelsLoaded {
        source: String,
        result: Result<Vec<u8>, FetchError>,
    },
}

/// Decoded-and-ready picture for the current image URL
#[derive(Debug, Clone)]
struct Pixels {
    source: String,
    handle: Handle,
}

/// One mounted dog image component
#[derive(Debug)]
pub struct DogFetcher {
    api: DogApi,
    state: FetchState,
    pixels: Option<Pixels>,
}

impl DogFetcher {
    /// Mount a new instance
    ///
    /// Returns the component together with its first fetch; the host must run
    /// that task, which is what makes the fetch happen exactly once per mount.
    pub fn mount(api: DogApi, policy: OverlapPolicy) -> (Self, Task<Message>) {
        let mut fetcher = DogFetcher {
            api,
            state: FetchState::new(policy),
            pixels: None,
        };
        let first_fetch = fetcher.fetch();
        (fetcher, first_fetch)
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Handle a message and return whatever has to run next
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FetchRequested => self.fetch(),
            Message::Fetched(request, result) => match self.state.finish(request, result) {
                Outcome::Loaded(url) => {
                    info!(request = request.get(), %url, "dog image fetched");
                    self.download_pixels(url)
                }
                Outcome::Failed(error) => {
                    warn!(request = request.get(), %error, "dog image fetch failed");
                    Task::none()
                }
                Outcome::Stale => Task::none(),
            },
            Message::PixelsLoaded { source, result } => {
                if self.state.image() != Some(source.as_str()) {
                    debug!(%source, "ignoring pixels for an image that is no longer current");
                    return Task::none();
                }

                match result {
                    Ok(bytes) => {
                        self.pixels = Some(Pixels {
                            source,
                            handle: Handle::from_bytes(bytes),
                        });
                    }
                    Err(error) => {
                        // Stays on the URL placeholder, the error line is for the JSON fetch
                        warn!(%source, %error, "could not download dog image");
                    }
                }
                Task::none()
            }
        }
    }

    /// Rendering inputs derived from the current state
    pub fn view_model(&self) -> ViewModel {
        let handle = self
            .pixels
            .as_ref()
            .filter(|pixels| self.state.image() == Some(pixels.source.as_str()))
            .map(|pixels| pixels.handle.clone());

        ViewModel::new(&self.state, handle)
    }

    pub fn view(&self) -> Element<'_, Message> {
        ui::view(self.view_model())
    }

    /// Start phase of the fetch operation
    fn fetch(&mut self) -> Task<Message> {
        let request = self.state.begin();
        let api = self.api.clone();

        info!(request = request.get(), endpoint = %api.endpoint(), "fetching dog image");

        Task::perform(
            client::isolate(async move { api.random_image().await }),
            move |result| Message::Fetched(request, result),
        )
    }

    fn download_pixels(&self, url: String) -> Task<Message> {
        if self.pixels.as_ref().is_some_and(|pixels| pixels.source == url) {
            return Task::none();
        }

        let api = self.api.clone();
        let source = url.clone();

        Task::perform(
            client::isolate(async move { api.image_bytes(&url).await }),
            move |result| Message::PixelsLoaded {
                source: source.clone(),
                result,
            },
        )
    }
}

/// Identity of one mount of the component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

/// A component message tagged with the instance that produced it
#[derive(Debug, Clone)]
pub struct Scoped {
    pub instance: InstanceId,
    pub message: Message,
}

/// Host-side holder of the (at most one) mounted component
#[derive(Debug, Default)]
pub struct Slot {
    mounted: Option<(InstanceId, DogFetcher)>,
    next_instance: u64,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn instance(&self) -> Option<InstanceId> {
        self.mounted.as_ref().map(|(id, _)| *id)
    }

    pub fn component(&self) -> Option<&DogFetcher> {
        self.mounted.as_ref().map(|(_, fetcher)| fetcher)
    }

    /// Mount a fresh component, replacing any mounted one
    pub fn mount(&mut self, api: DogApi, policy: OverlapPolicy) -> Task<Scoped> {
        self.unmount();

        self.next_instance += 1;
        let instance = InstanceId(self.next_instance);
        let (fetcher, first_fetch) = DogFetcher::mount(api, policy);

        info!(
            instance = instance.0,
            policy = ?fetcher.state().policy(),
            "dog fetcher mounted"
        );
        self.mounted = Some((instance, fetcher));

        first_fetch.map(move |message| Scoped { instance, message })
    }

    /// Drop the mounted component; its in-flight results will be ignored
    pub fn unmount(&mut self) {
        if let Some((instance, _)) = self.mounted.take() {
            info!(instance = instance.0, "dog fetcher unmounted");
        }
    }

    /// Deliver a message to the instance it belongs to, if still mounted
    pub fn update(&mut self, scoped: Scoped) -> Task<Scoped> {
        let Scoped { instance, message } = scoped;

        match &mut self.mounted {
            Some((current, fetcher)) if *current == instance => fetcher
                .update(message)
                .map(move |message| Scoped { instance, message }),
            _ => {
                debug!(instance = instance.0, "dropping message for an unmounted dog fetcher");
                Task::none()
            }
        }
    }

    /// The mounted component's view, or nothing
    pub fn view(&self) -> Option<Element<'_, Scoped>> {
        let instance = self.instance()?;
        let fetcher = self.component()?;

        Some(
            fetcher
                .view()
                .map(move |message| Scoped { instance, message }),
        )
    }
}
