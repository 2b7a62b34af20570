use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length, Task, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod state;
mod ui;

use api::DogApi;
use config::Settings;
use state::component::{Scoped, Slot};

/// Host window around the dog image component
struct DogFetcherApp {
    settings: Settings,
    api: DogApi,
    /// Where the component lives while mounted
    slot: Slot,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Something for (or from) the mounted component
    Component(Scoped),
    /// User clicked "Hide" / "Show"
    ToggleMounted,
}

impl DogFetcherApp {
    /// Create the host and mount the component, which kicks off its first fetch
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let api = DogApi::new(settings.endpoint.clone());

        let mut slot = Slot::new();
        let first_fetch = slot.mount(api.clone(), settings.overlap_policy());

        (
            DogFetcherApp { settings, api, slot },
            first_fetch.map(Message::Component),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Component(scoped) => self.slot.update(scoped).map(Message::Component),
            Message::ToggleMounted => {
                if self.slot.is_mounted() {
                    self.slot.unmount();
                    Task::none()
                } else {
                    self.slot
                        .mount(self.api.clone(), self.settings.overlap_policy())
                        .map(Message::Component)
                }
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let toggle_label = if self.slot.is_mounted() { "Hide" } else { "Show" };
        let toggle = button(text(toggle_label).size(12))
            .on_press(Message::ToggleMounted)
            .padding(6);

        let body: Element<Message> = match self.slot.view() {
            Some(component) => component.map(Message::Component),
            None => text("Dog fetcher is hidden").size(16).into(),
        };

        let content = column![toggle, body]
            .spacing(10)
            .padding(10)
            .align_x(Alignment::End);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.settings.theme.into()
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting dog fetcher");

    iced::application("Dog Fetcher", DogFetcherApp::update, DogFetcherApp::view)
        .theme(DogFetcherApp::theme)
        .centered()
        .run_with(DogFetcherApp::new)
}
