//! Picking the live feed shown for a camera.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use url::Url;
use crate::api::cameras::{Camera, CameraStatus};
use crate::api::ident::ObjectId;
use crate::constants::HLS_PLAYLIST;


//------------ StreamSource --------------------------------------------------

/// Where the picture of a camera comes from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamSource {
    /// A stream on the streaming server, played through its HLS playlist.
    Hls { stream: String },

    /// A still image that is reloaded periodically.
    Image { url: String },

    /// A page of the camera's own web interface.
    Iframe { url: String },
}

impl StreamSource {
    pub fn hls(stream: impl Into<String>) -> Self {
        StreamSource::Hls { stream: stream.into() }
    }
}

/// A stream table entry as written in the config file.
///
/// A plain string is short for an HLS stream.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamEntry {
    Stream(String),
    Source(StreamSource),
}

impl From<StreamEntry> for StreamSource {
    fn from(entry: StreamEntry) -> Self {
        match entry {
            StreamEntry::Stream(stream) => StreamSource::hls(stream),
            StreamEntry::Source(source) => source,
        }
    }
}


//------------ Feed ----------------------------------------------------------

/// What to show in the grid cell of a camera.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Feed {
    /// The camera is not active. Nothing is played.
    Placeholder { status: CameraStatus },

    Hls { url: String },
    Image { url: String },
    Iframe { url: String },
}

impl Feed {
    pub fn url(&self) -> Option<&str> {
        match self {
            Feed::Placeholder { .. } => None,
            Feed::Hls { url } | Feed::Image { url } | Feed::Iframe { url } => {
                Some(url)
            }
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Feed::Placeholder { status } => {
                write!(f, "sin señal ({})", status)
            }
            Feed::Hls { url } => write!(f, "hls    {}", url),
            Feed::Image { url } => write!(f, "image  {}", url),
            Feed::Iframe { url } => write!(f, "iframe {}", url),
        }
    }
}


//------------ StreamTable ---------------------------------------------------

/// The static mapping from camera to stream source.
///
/// The table is configured locally. Whatever source address the API
/// reports for a camera is never used for playback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamTable {
    stream_uri: Url,
    default_stream: String,
    sources: BTreeMap<ObjectId, StreamSource>,
}

impl StreamTable {
    pub fn new(stream_uri: Url, default_stream: impl Into<String>) -> Self {
        let mut stream_uri = stream_uri;
        if !stream_uri.path().ends_with('/') {
            let path = format!("{}/", stream_uri.path());
            stream_uri.set_path(&path);
        }
        StreamTable {
            stream_uri,
            default_stream: default_stream.into(),
            sources: BTreeMap::new(),
        }
    }

    pub fn with_source(
        mut self, camera: impl Into<ObjectId>, source: StreamSource
    ) -> Self {
        self.insert(camera, source);
        self
    }

    pub fn insert(
        &mut self, camera: impl Into<ObjectId>, source: StreamSource
    ) {
        self.sources.insert(camera.into(), source);
    }

    pub fn stream_uri(&self) -> &Url {
        &self.stream_uri
    }

    /// Returns the source for a camera.
    ///
    /// Cameras without an entry play the default stream.
    pub fn source(&self, camera: &ObjectId) -> StreamSource {
        self.sources.get(camera).cloned().unwrap_or_else(|| {
            StreamSource::hls(self.default_stream.clone())
        })
    }

    /// Returns the playlist URL of an HLS stream.
    pub fn hls_url(&self, stream: &str) -> String {
        format!("{}{}/{}", self.stream_uri, stream, HLS_PLAYLIST)
    }

    /// Decides what to show for a camera.
    pub fn feed(&self, camera: &Camera) -> Feed {
        if !camera.is_active() {
            return Feed::Placeholder { status: camera.status() }
        }
        match self.source(&camera.id) {
            StreamSource::Hls { stream } => {
                Feed::Hls { url: self.hls_url(&stream) }
            }
            StreamSource::Image { url } => Feed::Image { url },
            StreamSource::Iframe { url } => Feed::Iframe { url },
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn default_table() -> StreamTable {
        Config::default().stream_table().unwrap()
    }

    fn camera(id: u64, status: CameraStatus) -> Camera {
        Camera {
            id: id.into(),
            name: format!("Cámara {}", id),
            location: "Pasillo A".into(),
            active: None,
            status: Some(status),
            source: Some("rtsp://192.0.2.1/ignored".into()),
        }
    }

    #[test]
    fn unknown_camera_plays_default_stream() {
        let table = default_table();
        assert_eq!(
            table.feed(&camera(9, CameraStatus::Active)),
            Feed::Hls {
                url: "http://localhost:8888/camara/index.m3u8".into()
            }
        );
    }

    #[test]
    fn table_entries_win() {
        let table = StreamTable::new(
            Url::parse("https://media.example.net/live").unwrap(), "camara"
        )
        .with_source(1, StreamSource::hls("entrada"))
        .with_source(
            3, StreamSource::Image { url: "http://192.0.2.3/snap.jpg".into() }
        )
        .with_source(
            5, StreamSource::Iframe { url: "http://192.0.2.5/".into() }
        );

        assert_eq!(
            table.feed(&camera(1, CameraStatus::Active)).url(),
            Some("https://media.example.net/live/entrada/index.m3u8")
        );
        assert_eq!(
            table.feed(&camera(3, CameraStatus::Active)),
            Feed::Image { url: "http://192.0.2.3/snap.jpg".into() }
        );
        assert_eq!(
            table.feed(&camera(5, CameraStatus::Active)),
            Feed::Iframe { url: "http://192.0.2.5/".into() }
        );
    }

    #[test]
    fn inactive_cameras_get_placeholder() {
        let table = default_table().with_source(
            2, StreamSource::hls("estacionamiento")
        );
        assert_eq!(
            table.feed(&camera(2, CameraStatus::Inactive)),
            Feed::Placeholder { status: CameraStatus::Inactive }
        );
        assert_eq!(
            table.feed(&camera(4, CameraStatus::Maintenance)).url(), None
        );
    }

    #[test]
    fn entries_from_config() {
        let entries: BTreeMap<String, StreamEntry> = toml::from_str(
            r#"
            1 = "entrada"
            2 = { type = "image", url = "http://192.0.2.2/snap.jpg" }
            "#
        ).unwrap();
        assert_eq!(
            StreamSource::from(entries["1"].clone()),
            StreamSource::hls("entrada")
        );
        assert_eq!(
            StreamSource::from(entries["2"].clone()),
            StreamSource::Image { url: "http://192.0.2.2/snap.jpg".into() }
        );
    }
}
