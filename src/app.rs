use crate::api::ApiClient;
use crate::application::DownloadCoordinator;
use crate::domain::{DownloadPhase, FetchedImage};
use crate::ui::{DownloadMessage, DownloadView};
use iced::widget::image;
use iced::Task;
use std::path::PathBuf;

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
    // The fetched image, kept until saved or reset
    result: Option<FetchedImage>,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let coordinator = DownloadCoordinator::new(ApiClient::new(Default::default()));

        Self {
            view: DownloadView::default(),
            coordinator,
            result: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Outcome of the extract + fetch flow
    ImageFetched(Result<FetchedImage, String>),
    /// Save location chosen in the dialog (None = cancelled)
    SavePathSelected(Option<PathBuf>),
    /// Final result after writing the file
    SaveCompleted(Result<PathBuf, String>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::FetchPressed => return start_fetch(app),
                DownloadMessage::SavePressed => return start_save(app),
                DownloadMessage::ResetPressed => reset(app),
                DownloadMessage::UrlChanged(_) => {}
            }
        }
        Message::ImageFetched(result) => match result {
            Ok(fetched) => {
                app.view.phase = DownloadPhase::Ready;
                app.view.preview = Some(image::Handle::from_bytes(fetched.bytes.clone()));
                app.view.status_message =
                    "Image loaded successfully! Click save to download.".to_string();
                app.result = Some(fetched);
            }
            Err(e) => {
                app.view.phase = DownloadPhase::Idle;
                app.view.error = Some(e);
                app.result = None;
            }
        },
        Message::SavePathSelected(path_opt) => match path_opt {
            Some(path) => {
                if let Some(fetched) = app.result.clone() {
                    app.view.status_message = format!("Saving to: {}", path.display());

                    let coordinator = app.coordinator.clone();

                    return Task::perform(
                        async move {
                            coordinator
                                .save_image(fetched.bytes, &path)
                                .await
                                .map(|_| path)
                                .map_err(|e| e.to_string())
                        },
                        Message::SaveCompleted,
                    );
                }
            }
            None => {
                app.view.status_message = "Save cancelled".to_string();
            }
        },
        Message::SaveCompleted(result) => match result {
            Ok(path) => {
                app.view.status_message = format!("Saved: {}", path.display());
            }
            Err(e) => {
                // The image stays previewable; only the write failed
                app.view.error = Some(format!("Save failed: {}", e));
            }
        },
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

fn start_fetch(app: &mut DownloadApp) -> Task<Message> {
    if app.view.phase == DownloadPhase::Loading {
        return Task::none();
    }

    if app.view.url.trim().is_empty() {
        app.view.error = Some("Please enter an Instagram URL".to_string());
        return Task::none();
    }

    app.view.phase = DownloadPhase::Loading;
    app.view.error = None;
    app.view.status_message = "Fetching image...".to_string();
    app.view.preview = None;
    app.result = None;

    let coordinator = app.coordinator.clone();
    let url = app.view.url.clone();

    Task::perform(
        async move { coordinator.fetch(url).await.map_err(|e| e.to_string()) },
        Message::ImageFetched,
    )
}

fn start_save(app: &mut DownloadApp) -> Task<Message> {
    let Some(fetched) = app.result.clone() else {
        return Task::none();
    };

    app.view.error = None;

    let coordinator = app.coordinator.clone();

    Task::perform(
        async move { coordinator.choose_save_path(fetched.suggested_filename).await },
        Message::SavePathSelected,
    )
}

fn reset(app: &mut DownloadApp) {
    app.view = DownloadView::default();
    app.result = None;
}
