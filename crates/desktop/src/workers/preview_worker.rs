use std::sync::Arc;
use std::thread;

use crossbeam_channel::Receiver;
use iced::widget::image;

use people_counter_core::form::upload_form::{PreviewId, PreviewTicket};
use people_counter_core::preview::domain::preview_image::{PreviewError, PreviewImage};
use people_counter_core::preview::domain::preview_loader::PreviewLoader;

/// Result of one preview job, tagged with the selection it was started for.
pub struct PreviewDone {
    pub id: PreviewId,
    pub result: Result<ReadyPreview, PreviewError>,
}

/// A preview plus the image handle the UI draws it from.
pub struct ReadyPreview {
    pub image: PreviewImage,
    pub handle: image::Handle,
}

/// Spawn a background preview read. The payload is decoded here so the UI
/// thread only swaps handles. The receiver yields exactly one message unless
/// the loader panics, in which case it disconnects.
pub fn spawn(ticket: PreviewTicket, loader: Arc<dyn PreviewLoader>) -> Receiver<PreviewDone> {
    let (tx, rx) = crossbeam_channel::unbounded::<PreviewDone>();

    thread::spawn(move || {
        let result = loader.load(&ticket.file).and_then(|preview| {
            let bytes = preview.decode_payload()?;
            Ok(ReadyPreview {
                image: preview,
                handle: image::Handle::from_bytes(bytes),
            })
        });
        let _ = tx.send(PreviewDone {
            id: ticket.id,
            result,
        });
    });

    rx
}
