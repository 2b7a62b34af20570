use iced::widget::{button, column, container, image, text, Column};
use iced::{Alignment, Color, Element, Length};

use super::view_model::{ImageSlot, ImageView, ViewModel};
use crate::state::component::Message;

/// Error text color
const ERROR_RED: Color = Color::from_rgb(1.0, 0.3, 0.3);

/// Build the component's widget tree
pub fn view<'a>(model: ViewModel) -> Element<'a, Message> {
    let ViewModel {
        title,
        button_label,
        button_enabled,
        error_text,
        image: picture,
    } = model;

    // A button without on_press renders disabled
    let trigger = button(text(button_label).size(16))
        .on_press_maybe(button_enabled.then_some(Message::FetchRequested))
        .padding([10, 20]);

    let mut content: Column<'a, Message> = column![text(title).size(32), trigger]
        .spacing(20)
        .padding(20)
        .align_x(Alignment::Center);

    if let Some(error) = error_text {
        content = content.push(text(error).size(16).color(ERROR_RED));
    }

    if let Some(picture) = picture {
        content = content.push(image_area(picture));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn image_area<'a>(picture: ImageView) -> Element<'a, Message> {
    match picture.slot {
        ImageSlot::Ready(handle) => container(image(handle).width(Length::Fill))
            .max_width(600)
            .center_x(Length::Fill)
            .into(),
        // Nothing to draw yet, show where it comes from
        ImageSlot::Pending => text(picture.source).size(12).into(),
    }
}
