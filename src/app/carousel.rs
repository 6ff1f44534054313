use crate::api::Track;
use rand::Rng;
use rand::seq::IteratorRandom;
use std::time::Duration;

pub const MAX_SLIDES: usize = 5;
pub const ROTATE_EVERY: Duration = Duration::from_secs(5);

/// Featured tracks on the home screen.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    slides: Vec<Track>,
    index: usize,
    timer_started: bool,
}

impl Carousel {
    /// Pick up to five random tracks that have cover art.
    pub fn sample<R: Rng + ?Sized>(tracks: &[Track], rng: &mut R) -> Vec<Track> {
        tracks
            .iter()
            .filter(|t| t.has_cover)
            .cloned()
            .choose_multiple(rng, MAX_SLIDES)
    }

    /// Replace the slides. Returns true only the first time, when the caller
    /// should start the rotation timer.
    pub fn init(&mut self, slides: Vec<Track>) -> bool {
        self.slides = slides;
        self.index = 0;
        let start_timer = !self.timer_started;
        self.timer_started = true;
        start_timer
    }

    pub fn slides(&self) -> &[Track] {
        &self.slides
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Track> {
        self.slides.get(self.index)
    }

    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + self.slides.len() - 1) % self.slides.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn track(id: usize, has_cover: bool) -> Track {
        Track {
            id: id.to_string(),
            title: format!("T{id}"),
            has_cover,
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_only_covered_and_capped() {
        let tracks: Vec<Track> = (0..12).map(|i| track(i, i % 2 == 0)).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let slides = Carousel::sample(&tracks, &mut rng);
        assert_eq!(slides.len(), MAX_SLIDES);
        assert!(slides.iter().all(|t| t.has_cover));
    }

    #[test]
    fn test_sample_fewer_than_max() {
        let tracks = vec![track(1, true), track(2, false)];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Carousel::sample(&tracks, &mut rng).len(), 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut c = Carousel::default();
        assert!(c.init(vec![track(1, true), track(2, true)]));
        c.next();
        assert!(!c.init(vec![track(3, true)]));
        assert_eq!(c.index(), 0);
        assert_eq!(c.slides().len(), 1);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut c = Carousel::default();
        c.init(vec![track(1, true), track(2, true), track(3, true)]);
        c.prev();
        assert_eq!(c.current().map(|t| t.id.as_str()), Some("3"));
        c.next();
        c.next();
        assert_eq!(c.current().map(|t| t.id.as_str()), Some("1"));
    }

    #[test]
    fn test_empty_carousel_navigation_is_noop() {
        let mut c = Carousel::default();
        c.next();
        c.prev();
        assert!(c.current().is_none());
    }
}
