use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use people_counter_core::form::form_view;
use people_counter_core::form::upload_form::{PreviewId, SubmissionId, SubmitOutcome, UploadForm};
use people_counter_core::preview::domain::preview_loader::PreviewLoader;
use people_counter_core::preview::infrastructure::file_preview_loader::FilePreviewLoader;
use people_counter_core::shared::constants::IMAGE_EXTENSIONS;
use people_counter_core::shared::selected_file::SelectedFile;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme::{self, FormStyle};
use crate::workers::analysis_worker::{self, AnalysisDone};
use crate::workers::preview_worker::{self, PreviewDone};

const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Main,
    Settings,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Main, Tab::Settings];

    fn label(self) -> &'static str {
        match self {
            Tab::Main => "Count People",
            Tab::Settings => "Settings",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    SelectFile,
    FilesSelected(Vec<PathBuf>),
    Upload,
    PollWorkers,
    BrowseHovered(bool),
    UploadHovered(bool),
    EndpointChanged(String),
    AppearanceChanged(Appearance),
    FontScaleChanged(f32),
    RestoreDefaults,
    PollSystemTheme,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HoverState {
    pub browse: bool,
    pub upload: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    form: UploadForm,
    preview_loader: Arc<dyn PreviewLoader>,
    preview_jobs: Vec<(PreviewId, Receiver<PreviewDone>)>,
    analysis_job: Option<(SubmissionId, Receiver<AnalysisDone>)>,
    /// Pixels of the current preview, decoded by the preview worker.
    preview_handle: Option<image::Handle>,
    hover: HoverState,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (Self::with_settings(Settings::load()), Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        Self {
            active_tab: Tab::Main,
            settings,
            form: UploadForm::new(),
            preview_loader: Arc::new(FilePreviewLoader::new()),
            preview_jobs: Vec::new(),
            analysis_job: None,
            preview_handle: None,
            hover: HoverState::default(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::SelectFile => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select an image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_files()
                            .await
                            .map(|handles| {
                                handles
                                    .into_iter()
                                    .map(|h| h.path().to_path_buf())
                                    .collect()
                            })
                            .unwrap_or_default()
                    },
                    Message::FilesSelected,
                );
            }
            Message::FilesSelected(paths) => {
                self.select_files(paths);
            }
            Message::Upload => {
                self.submit();
            }
            Message::PollWorkers => {
                self.poll_previews();
                self.poll_analysis();
            }
            Message::BrowseHovered(hovered) => {
                self.hover.browse = hovered;
            }
            Message::UploadHovered(hovered) => {
                self.hover.upload = hovered;
            }
            Message::EndpointChanged(endpoint) => {
                self.settings.endpoint = endpoint;
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                self.settings = Settings::default();
                self.settings.save();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render,
                // so just requesting a redraw is enough.
            }
        }
        Task::none()
    }

    fn select_files(&mut self, paths: Vec<PathBuf>) {
        let files = paths.into_iter().map(SelectedFile::from_path);
        if let Some(ticket) = self.form.select_files(files) {
            log::info!("Selected {}", ticket.file.name());
            self.preview_handle = None;
            let id = ticket.id;
            let rx = preview_worker::spawn(ticket, self.preview_loader.clone());
            self.preview_jobs.push((id, rx));
        }
    }

    fn submit(&mut self) {
        match self.form.begin_submission() {
            SubmitOutcome::Started(ticket) => {
                let id = ticket.id;
                let rx = analysis_worker::spawn(ticket, self.settings.endpoint.clone());
                self.analysis_job = Some((id, rx));
            }
            SubmitOutcome::NoFileSelected => {
                log::info!("Upload requested with no file selected");
            }
            SubmitOutcome::AlreadySubmitting => {}
        }
    }

    fn poll_previews(&mut self) {
        let mut finished = Vec::new();
        self.preview_jobs.retain(|(id, rx)| match rx.try_recv() {
            Ok(done) => {
                finished.push((done.id, done.result.map_err(|e| e.to_string())));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push((*id, Err("preview worker exited without a result".to_string())));
                false
            }
        });

        for (id, result) in finished {
            let (result, handle) = match result {
                Ok(ready) => (Ok(ready.image), Some(ready.handle)),
                Err(e) => (Err(e), None),
            };
            if self.form.finish_preview(id, result) {
                self.preview_handle = handle;
            }
        }
    }

    fn poll_analysis(&mut self) {
        let Some((id, rx)) = &self.analysis_job else {
            return;
        };
        let id = *id;
        let result = match rx.try_recv() {
            Ok(done) => done.result.map_err(|e| e.to_string()),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err("analysis worker exited without a result".to_string())
            }
        };
        self.analysis_job = None;
        self.form.finish_submission(id, result);
    }

    fn has_pending_jobs(&self) -> bool {
        !self.preview_jobs.is_empty() || self.analysis_job.is_some()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let style = FormStyle::from_theme(&self.theme(), fs);

        // Tab bar
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        // Tab content
        let content: Element<'_, Message> = match self.active_tab {
            Tab::Main => tabs::main_tab::view(
                form_view::render(&self.form),
                &style,
                self.preview_handle.as_ref(),
                self.hover,
            ),
            Tab::Settings => tabs::settings_tab::view(&self.settings),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(20)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let workers = if self.has_pending_jobs() {
            iced::time::every(WORKER_POLL_INTERVAL).map(|_| Message::PollWorkers)
        } else {
            Subscription::none()
        };

        let system_theme = if self.settings.appearance == Appearance::System {
            iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme)
        } else {
            Subscription::none()
        };

        Subscription::batch([workers, system_theme])
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
