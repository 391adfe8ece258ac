//! Carousel Navigator
//!
//! Current-image selection plus a fixed-size thumbnail window over a car's
//! gallery. Navigation is circular; the window is re-anchored whenever the
//! selection would leave it.

use crate::config::DEFAULT_THUMBNAIL_WINDOW;
use crate::models::Car;

/// What the main image slot shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselMode {
    /// Non-empty gallery, index navigation enabled
    Gallery,
    /// No gallery; the car's primary image
    SingleImage(String),
    /// Nothing to show
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselNavigator {
    gallery: Vec<String>,
    mode: CarouselMode,
    current_index: usize,
    window_start: usize,
    window_size: usize,
}

impl CarouselNavigator {
    /// Pick the display mode, in priority order: gallery, primary image, placeholder.
    pub fn new(
        gallery: Vec<String>,
        primary_image: Option<String>,
        placeholder: impl Into<String>,
        window_size: usize,
    ) -> Self {
        let mode = if !gallery.is_empty() {
            CarouselMode::Gallery
        } else if let Some(image) = primary_image.filter(|i| !i.is_empty()) {
            CarouselMode::SingleImage(image)
        } else {
            CarouselMode::Placeholder(placeholder.into())
        };

        Self {
            gallery,
            mode,
            current_index: 0,
            window_start: 0,
            window_size: window_size.max(1),
        }
    }

    pub fn for_car(car: &Car, placeholder: impl Into<String>, window_size: usize) -> Self {
        Self::new(car.data.gallery.clone(), car.data.image_url.clone(), placeholder, window_size)
    }

    pub fn with_default_window(gallery: Vec<String>) -> Self {
        Self::new(gallery, None, "", DEFAULT_THUMBNAIL_WINDOW)
    }

    // ========================
    // Queries
    // ========================

    pub fn mode(&self) -> &CarouselMode {
        &self.mode
    }

    /// True when index navigation applies
    pub fn is_navigable(&self) -> bool {
        self.mode == CarouselMode::Gallery
    }

    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn current_image(&self) -> &str {
        match &self.mode {
            CarouselMode::Gallery => &self.gallery[self.current_index],
            CarouselMode::SingleImage(image) | CarouselMode::Placeholder(image) => image,
        }
    }

    /// Thumbnails in the window, paired with their gallery index
    pub fn visible_thumbnails(&self) -> Vec<(usize, &str)> {
        if !self.is_navigable() {
            return Vec::new();
        }
        let end = (self.window_start + self.window_size).min(self.gallery.len());
        (self.window_start..end).map(|i| (i, self.gallery[i].as_str())).collect()
    }

    pub fn can_scroll_left(&self) -> bool {
        self.window_start > 0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.window_start + self.window_size < self.gallery.len()
    }

    // ========================
    // Navigation
    // ========================

    pub fn next(&mut self) {
        if !self.is_navigable() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.gallery.len();
        self.ensure_current_visible();
    }

    pub fn previous(&mut self) {
        if !self.is_navigable() {
            return;
        }
        self.current_index = if self.current_index == 0 {
            self.gallery.len() - 1
        } else {
            self.current_index - 1
        };
        self.ensure_current_visible();
    }

    /// Jump to `index`. Callers pass valid indices; anything else is ignored.
    pub fn select_index(&mut self, index: usize) {
        if !self.is_navigable() {
            return;
        }
        debug_assert!(index < self.gallery.len(), "thumbnail index out of range");
        if index >= self.gallery.len() {
            return;
        }
        self.current_index = index;
        self.ensure_current_visible();
    }

    /// Shift the window one page forward. Stops at the last page.
    pub fn next_window(&mut self) {
        if self.can_scroll_right() {
            self.window_start += self.window_size;
        }
    }

    /// Shift the window one page back, clamped at 0
    pub fn previous_window(&mut self) {
        self.window_start = self.window_start.saturating_sub(self.window_size);
    }

    /// Re-anchor the window on the page containing the current index.
    pub fn ensure_current_visible(&mut self) {
        let in_window = self.current_index >= self.window_start
            && self.current_index < self.window_start + self.window_size;
        if !in_window {
            self.window_start = (self.current_index / self.window_size) * self.window_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CarDraft;

    const PLACEHOLDER: &str = "assets/images/no-car-image.png";

    fn gallery(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("camry-{}", i)).collect()
    }

    fn assert_visible(nav: &CarouselNavigator) {
        assert!(nav.window_start() <= nav.current_index());
        assert!(nav.current_index() < nav.window_start() + nav.window_size());
        assert_eq!(nav.window_start() % nav.window_size(), 0);
    }

    #[test]
    fn test_init_prefers_gallery() {
        let nav = CarouselNavigator::new(gallery(3), Some("primary.png".into()), PLACEHOLDER, 5);
        assert_eq!(nav.mode(), &CarouselMode::Gallery);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.window_start(), 0);
        assert_eq!(nav.current_image(), "camry-1");
    }

    #[test]
    fn test_init_falls_back_to_primary_then_placeholder() {
        let nav = CarouselNavigator::new(Vec::new(), Some("primary.png".into()), PLACEHOLDER, 5);
        assert_eq!(nav.current_image(), "primary.png");
        assert!(!nav.is_navigable());
        assert!(nav.visible_thumbnails().is_empty());

        let nav = CarouselNavigator::new(Vec::new(), None, PLACEHOLDER, 5);
        assert_eq!(nav.mode(), &CarouselMode::Placeholder(PLACEHOLDER.to_string()));
        assert_eq!(nav.current_image(), PLACEHOLDER);
    }

    #[test]
    fn test_for_car() {
        let car = Car::new(1, CarDraft {
            brand: "Toyota".into(),
            model: "Camry".into(),
            image_url: Some("camry.png".into()),
            ..Default::default()
        });
        let nav = CarouselNavigator::for_car(&car, PLACEHOLDER, 5);
        assert_eq!(nav.current_image(), "camry.png");
    }

    #[test]
    fn test_previous_wraps() {
        let mut nav = CarouselNavigator::with_default_window(gallery(3));
        nav.select_index(2);
        nav.previous();
        nav.previous();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.current_image(), "camry-1");

        nav.previous();
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.current_image(), "camry-3");
    }

    #[test]
    fn test_next_wraps() {
        let mut nav = CarouselNavigator::with_default_window(gallery(3));
        nav.select_index(2);
        nav.next();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_next_is_cyclic() {
        for n in 1..=12 {
            let mut nav = CarouselNavigator::with_default_window(gallery(n));
            for start in 0..n {
                nav.select_index(start);
                for _ in 0..n {
                    nav.next();
                    assert_visible(&nav);
                }
                assert_eq!(nav.current_index(), start, "gallery of {}", n);
            }
        }
    }

    #[test]
    fn test_previous_inverts_next() {
        let mut nav = CarouselNavigator::with_default_window(gallery(7));
        for start in 0..7 {
            nav.select_index(start);
            nav.next();
            nav.previous();
            assert_eq!(nav.current_index(), start);
            nav.previous();
            nav.next();
            assert_eq!(nav.current_index(), start);
        }
    }

    #[test]
    fn test_single_image_gallery() {
        let mut nav = CarouselNavigator::with_default_window(gallery(1));
        nav.next();
        assert_eq!(nav.current_index(), 0);
        nav.previous();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_navigation_without_gallery_is_noop() {
        let mut nav = CarouselNavigator::new(Vec::new(), Some("primary.png".into()), PLACEHOLDER, 5);
        nav.next();
        nav.previous();
        nav.select_index(0);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.current_image(), "primary.png");
    }

    #[test]
    fn test_window_follows_selection() {
        let mut nav = CarouselNavigator::with_default_window(gallery(12));
        for _ in 0..5 {
            nav.next();
        }
        assert_eq!(nav.current_index(), 5);
        assert_eq!(nav.window_start(), 5);

        nav.select_index(11);
        assert_eq!(nav.window_start(), 10);
        assert_eq!(nav.visible_thumbnails(), vec![(10, "camry-11"), (11, "camry-12")]);

        nav.next();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.window_start(), 0);

        nav.previous();
        assert_eq!(nav.window_start(), 10);
    }

    #[test]
    fn test_window_scrolling_and_flags() {
        let mut nav = CarouselNavigator::with_default_window(gallery(12));
        assert!(!nav.can_scroll_left());
        assert!(nav.can_scroll_right());

        nav.next_window();
        assert_eq!(nav.window_start(), 5);
        assert!(nav.can_scroll_left());
        assert!(nav.can_scroll_right());

        nav.next_window();
        assert_eq!(nav.window_start(), 10);
        assert!(!nav.can_scroll_right());

        nav.next_window();
        assert_eq!(nav.window_start(), 10);

        nav.previous_window();
        nav.previous_window();
        nav.previous_window();
        assert_eq!(nav.window_start(), 0);
    }

    #[test]
    fn test_scrolling_away_then_navigating_reanchors() {
        let mut nav = CarouselNavigator::with_default_window(gallery(12));
        nav.next_window();
        nav.next_window();
        assert_eq!(nav.current_index(), 0);

        nav.next();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.window_start(), 0);
    }

    #[test]
    fn test_small_gallery_has_no_scroll() {
        let nav = CarouselNavigator::with_default_window(gallery(3));
        assert!(!nav.can_scroll_left());
        assert!(!nav.can_scroll_right());
        assert_eq!(nav.visible_thumbnails().len(), 3);

        let nav = CarouselNavigator::with_default_window(gallery(5));
        assert!(!nav.can_scroll_right());
    }
}
