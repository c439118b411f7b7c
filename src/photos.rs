use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::errors::{LendingError, Result};
use crate::events::{Event, EventStore};
use crate::types::{CarrierId, PhotoId};

/// photo attached to a carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub carrier_id: CarrierId,
    pub filename: String,
    pub content_type: String,
    pub byte_size: usize,
    /// hex sha-256 of the content
    pub checksum: String,
}

/// storage for carrier photos
pub trait PhotoStorage: Send + Sync {
    /// read `io` to the end and attach it under `filename`
    ///
    /// Attaching the same filename with the same content again returns the
    /// id of the photo already stored.
    fn attach<R: Read>(&mut self, carrier_id: CarrierId, io: R, filename: &str) -> Result<PhotoId>;

    fn is_attached(&self, carrier_id: CarrierId) -> bool;

    fn photos(&self, carrier_id: CarrierId) -> Vec<&Photo>;

    fn detach(&mut self, carrier_id: CarrierId, photo_id: PhotoId) -> Result<()>;
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// in-memory photo store
#[derive(Debug)]
pub struct InMemoryPhotoStore {
    photos: HashMap<CarrierId, Vec<Photo>>,
    blobs: HashMap<String, Vec<u8>>,
    max_photo_bytes: usize,
    pub events: EventStore,
}

impl InMemoryPhotoStore {
    pub fn new(config: &LendingConfig) -> Self {
        Self {
            photos: HashMap::new(),
            blobs: HashMap::new(),
            max_photo_bytes: config.max_photo_bytes,
            events: EventStore::new(),
        }
    }

    /// stored bytes of a photo
    pub fn content(&self, photo: &Photo) -> Option<&[u8]> {
        self.blobs.get(&photo.checksum).map(Vec::as_slice)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn read_limited<R: Read>(&self, io: R) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let limit = u64::try_from(self.max_photo_bytes)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        io.take(limit).read_to_end(&mut data)?;

        if data.len() > self.max_photo_bytes {
            return Err(LendingError::Attachment {
                message: format!("photo exceeds {} bytes", self.max_photo_bytes),
            });
        }
        Ok(data)
    }
}

impl Default for InMemoryPhotoStore {
    fn default() -> Self {
        Self::new(&LendingConfig::default())
    }
}

impl PhotoStorage for InMemoryPhotoStore {
    fn attach<R: Read>(&mut self, carrier_id: CarrierId, io: R, filename: &str) -> Result<PhotoId> {
        if filename.trim().is_empty() {
            return Err(LendingError::Attachment {
                message: "filename can't be blank".to_string(),
            });
        }

        let data = self.read_limited(io)?;
        let checksum = format!("{:x}", Sha256::digest(&data));

        let existing = self
            .photos
            .get(&carrier_id)
            .and_then(|set| {
                set.iter()
                    .find(|p| p.filename == filename && p.checksum == checksum)
            })
            .map(|p| p.id);
        if let Some(id) = existing {
            tracing::debug!(carrier_id = %carrier_id, photo_id = %id, "photo already attached");
            return Ok(id);
        }

        let photo = Photo {
            id: Uuid::new_v4(),
            carrier_id,
            filename: filename.to_string(),
            content_type: content_type_for(filename).to_string(),
            byte_size: data.len(),
            checksum: checksum.clone(),
        };
        let id = photo.id;

        tracing::info!(
            carrier_id = %carrier_id,
            photo_id = %id,
            filename,
            byte_size = data.len(),
            "attached photo"
        );
        self.events.emit(Event::PhotoAttached {
            carrier_id,
            photo_id: id,
            filename: photo.filename.clone(),
            byte_size: photo.byte_size,
        });

        self.blobs.entry(checksum).or_insert(data);
        self.photos.entry(carrier_id).or_default().push(photo);

        Ok(id)
    }

    fn is_attached(&self, carrier_id: CarrierId) -> bool {
        self.photos
            .get(&carrier_id)
            .map_or(false, |set| !set.is_empty())
    }

    fn photos(&self, carrier_id: CarrierId) -> Vec<&Photo> {
        self.photos
            .get(&carrier_id)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    fn detach(&mut self, carrier_id: CarrierId, photo_id: PhotoId) -> Result<()> {
        let set = self.photos.get_mut(&carrier_id).ok_or(LendingError::NotFound {
            entity: "photo",
            id: photo_id,
        })?;
        let index = set
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or(LendingError::NotFound {
                entity: "photo",
                id: photo_id,
            })?;
        let removed = set.remove(index);

        // blobs are shared by checksum across carriers
        let still_used = self
            .photos
            .values()
            .flatten()
            .any(|p| p.checksum == removed.checksum);
        if !still_used {
            self.blobs.remove(&removed.checksum);
        }

        tracing::info!(carrier_id = %carrier_id, photo_id = %photo_id, "detached photo");
        self.events.emit(Event::PhotoDetached {
            carrier_id,
            photo_id,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Cursor, Write};

    // png signature plus an IHDR chunk header
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn test_attach_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_BYTES).unwrap();

        let mut store = InMemoryPhotoStore::default();
        let carrier_id = Uuid::new_v4();
        assert!(!store.is_attached(carrier_id));

        let io = File::open(file.path()).unwrap();
        let id = store.attach(carrier_id, io, "apple-touch-icon.png").unwrap();

        assert!(store.is_attached(carrier_id));
        let photos = store.photos(carrier_id);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, id);
        assert_eq!(photos[0].content_type, "image/png");
        assert_eq!(photos[0].byte_size, PNG_BYTES.len());
        assert_eq!(store.content(photos[0]), Some(PNG_BYTES));
    }

    #[test]
    fn test_attach_is_idempotent_per_file() {
        let mut store = InMemoryPhotoStore::default();
        let carrier_id = Uuid::new_v4();

        let first = store.attach(carrier_id, Cursor::new(PNG_BYTES), "a.png").unwrap();
        let again = store.attach(carrier_id, Cursor::new(PNG_BYTES), "a.png").unwrap();
        assert_eq!(first, again);
        assert_eq!(store.photos(carrier_id).len(), 1);

        // same name, different bytes is a distinct file
        store.attach(carrier_id, Cursor::new(b"other".to_vec()), "a.png").unwrap();
        // same bytes, different name too
        store.attach(carrier_id, Cursor::new(PNG_BYTES), "b.PNG").unwrap();
        assert_eq!(store.photos(carrier_id).len(), 3);

        let attached = store
            .take_events()
            .iter()
            .filter(|e| matches!(e, Event::PhotoAttached { .. }))
            .count();
        assert_eq!(attached, 3);
    }

    #[test]
    fn test_photos_are_per_carrier() {
        let mut store = InMemoryPhotoStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.attach(a, Cursor::new(PNG_BYTES), "a.png").unwrap();

        assert!(store.is_attached(a));
        assert!(!store.is_attached(b));
        assert!(store.photos(b).is_empty());
    }

    #[test]
    fn test_attach_rejects_blank_filename() {
        let mut store = InMemoryPhotoStore::default();
        let result = store.attach(Uuid::new_v4(), Cursor::new(PNG_BYTES), "  ");

        assert!(matches!(result, Err(LendingError::Attachment { .. })));
    }

    #[test]
    fn test_attach_rejects_oversized() {
        let config = LendingConfig {
            max_photo_bytes: 4,
            ..LendingConfig::standard()
        };
        let mut store = InMemoryPhotoStore::new(&config);
        let carrier_id = Uuid::new_v4();

        assert!(store.attach(carrier_id, Cursor::new(vec![0u8; 4]), "ok.jpg").is_ok());
        assert!(matches!(
            store.attach(carrier_id, Cursor::new(vec![0u8; 5]), "big.jpg"),
            Err(LendingError::Attachment { .. })
        ));
    }

    #[test]
    fn test_attach_with_unbounded_photo_limit() {
        let config =
            LendingConfig::from_json(r#"{ "max_photo_bytes": 18446744073709551615 }"#).unwrap();
        assert_eq!(config.max_photo_bytes, usize::MAX);

        let mut store = InMemoryPhotoStore::new(&config);
        let carrier_id = Uuid::new_v4();
        store.attach(carrier_id, Cursor::new(vec![1u8, 2, 3]), "a.png").unwrap();

        assert!(store.is_attached(carrier_id));
        assert_eq!(store.photos(carrier_id)[0].byte_size, 3);
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        fn assert_send_sync<T: PhotoStorage>() {}
        assert_send_sync::<InMemoryPhotoStore>();

        let mut store = InMemoryPhotoStore::default();
        let carrier_id = Uuid::new_v4();
        store.attach(carrier_id, Cursor::new(PNG_BYTES), "a.png").unwrap();

        let shared = std::sync::Arc::new(store);
        let reader = std::sync::Arc::clone(&shared);
        let attached = std::thread::spawn(move || reader.is_attached(carrier_id))
            .join()
            .unwrap();
        assert!(attached);
    }

    #[test]
    fn test_detach() {
        let mut store = InMemoryPhotoStore::default();
        let carrier_id = Uuid::new_v4();
        let id = store.attach(carrier_id, Cursor::new(PNG_BYTES), "a.png").unwrap();

        store.detach(carrier_id, id).unwrap();

        assert!(!store.is_attached(carrier_id));
        assert!(matches!(
            store.events.events().last(),
            Some(Event::PhotoDetached { photo_id, .. }) if *photo_id == id
        ));
        assert!(store.blobs.is_empty());
        assert!(matches!(
            store.detach(carrier_id, id),
            Err(LendingError::NotFound { entity: "photo", .. })
        ));
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("photo.webp"), "image/webp");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
