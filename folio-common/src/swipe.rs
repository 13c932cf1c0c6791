/// What a finished touch gesture means for the lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Finger moved right to left
    Next,
    /// Finger moved left to right
    Previous,
    /// Too short to navigate; the click path decides what a tap does
    Tap,
}

/// Classify a horizontal gesture from its start and end X coordinates
pub fn classify_swipe(start_x: f64, end_x: f64, threshold: f64) -> SwipeOutcome {
    let distance = start_x - end_x;
    if distance > threshold {
        SwipeOutcome::Next
    } else if distance < -threshold {
        SwipeOutcome::Previous
    } else {
        SwipeOutcome::Tap
    }
}

/// Tracks one touch gesture at a time
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
    end_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
            end_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        self.end_x = Some(x);
    }

    /// Finish the gesture. A touch that never moved is a tap.
    pub fn touch_end(&mut self) -> SwipeOutcome {
        match (self.start_x.take(), self.end_x.take()) {
            (Some(start), Some(end)) => classify_swipe(start, end, self.threshold),
            _ => SwipeOutcome::Tap,
        }
    }
}
