use iced::{
    widget::{button, column, image as image_widget, row, text, text_input, Space},
    Element, Length,
};

use crate::domain::DownloadPhase;

/// Main view state
pub struct DownloadView {
    pub url: String,
    pub phase: DownloadPhase,
    pub error: Option<String>,
    pub status_message: String,
    pub preview: Option<image_widget::Handle>,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            url: String::new(),
            phase: DownloadPhase::Idle,
            error: None,
            status_message: "Paste an Instagram post URL to begin".to_string(),
            preview: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    FetchPressed,
    SavePressed,
    ResetPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                // The input is frozen while a fetch is in flight
                if self.phase != DownloadPhase::Loading {
                    self.url = url;
                }
            }
            // Button presses are handled by the app
            DownloadMessage::FetchPressed
            | DownloadMessage::SavePressed
            | DownloadMessage::ResetPressed => {}
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let mut content = column![
            text("Instagram Image Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Instagram post URL:").size(16),
            text_input("https://www.instagram.com/p/...", &self.url)
                .on_input(DownloadMessage::UrlChanged)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
        ];

        content = match &self.error {
            Some(error) => content.push(text(error).size(14)),
            None => content.push(text(&self.status_message).size(14)),
        };

        content = content.push(Space::new().height(Length::Fixed(20.0)));

        match self.phase {
            DownloadPhase::Idle => {
                content = content.push(
                    button("Get image")
                        .on_press(DownloadMessage::FetchPressed)
                        .padding([10, 20]),
                );
            }
            DownloadPhase::Loading => {
                // No on_press: rendered disabled until the fetch resolves
                content = content.push(button("Loading...").padding([10, 20]));
            }
            DownloadPhase::Ready => {
                if let Some(preview) = &self.preview {
                    content = content
                        .push(image_widget(preview.clone()).height(Length::Fixed(360.0)))
                        .push(Space::new().height(Length::Fixed(20.0)));
                }
                content = content.push(
                    row![
                        button("Save image")
                            .on_press(DownloadMessage::SavePressed)
                            .padding([10, 20]),
                        button("Download another")
                            .on_press(DownloadMessage::ResetPressed)
                            .padding([10, 20]),
                    ]
                    .spacing(10),
                );
            }
        }

        content.padding(20).spacing(10).into()
    }
}
