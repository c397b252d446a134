use tracing::debug;

/// A live camera stream made of one or more media tracks.
pub trait CameraStream {
    fn track_ids(&self) -> Vec<String>;

    fn stop_track(&mut self, track_id: &str);
}

/// Scoped ownership of an opened camera stream.
///
/// Every track is stopped when the lease is released or dropped, and only
/// once.
pub struct CameraLease<S: CameraStream> {
    stream: Option<S>,
}

impl<S: CameraStream> CameraLease<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Stops all tracks. Returns the number of tracks stopped.
    pub fn release(&mut self) -> usize {
        let Some(mut stream) = self.stream.take() else {
            return 0;
        };

        let tracks = stream.track_ids();
        for track_id in &tracks {
            stream.stop_track(track_id);
        }
        debug!(tracks = tracks.len(), "Released camera stream");
        tracks.len()
    }
}

impl<S: CameraStream> Drop for CameraLease<S> {
    fn drop(&mut self) {
        self.release();
    }
}
