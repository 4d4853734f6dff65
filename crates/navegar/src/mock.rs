//! Scripted in-memory browser driver for driver-free testing.
//!
//! [`MockDriver`] implements [`BrowserDriver`] over a mutable element table so
//! engine and page-model behavior can be exercised without a browser:
//! delayed rendering (elements that become visible after N lookups),
//! carousel reveals (elements that appear after N script-clicks on a
//! trigger), out-of-view geometry, stale handles across navigations, and
//! per-element interaction counters.

use std::sync::Mutex;

use serde_json::Value;

use crate::driver::{BoundingBox, BrowserDriver, ElementHandle, Viewport};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};

/// Default in-view bounding box for scripted elements
const DEFAULT_BBOX: BoundingBox = BoundingBox::new(10.0, 10.0, 60.0, 210.0);

/// A scripted element: one entry in the mock DOM.
#[derive(Debug, Clone)]
pub struct MockElement {
    locator: Locator,
    tag_name: String,
    visible: bool,
    enabled: bool,
    bbox: BoundingBox,
    text: String,
    value: String,
    visible_after_lookups: Option<u32>,
    reveal_after: Option<(Locator, u32)>,
    navigates_to: Option<String>,
    lookups: u32,
    clicks: u32,
    script_clicks: u32,
    scrolls: u32,
}

impl MockElement {
    /// Create a visible, enabled, in-view element matched by `locator`
    #[must_use]
    pub fn new(locator: Locator, tag_name: impl Into<String>) -> Self {
        Self {
            locator,
            tag_name: tag_name.into(),
            visible: true,
            enabled: true,
            bbox: DEFAULT_BBOX,
            text: String::new(),
            value: String::new(),
            visible_after_lookups: None,
            reveal_after: None,
            navigates_to: None,
            lookups: 0,
            clicks: 0,
            script_clicks: 0,
            scrolls: 0,
        }
    }

    /// Set base visibility
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set whether the element is enabled
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the bounding box (viewport coordinates)
    #[must_use]
    pub const fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the rendered text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Element only becomes visible once its locator has been resolved
    /// `lookups` times (simulates lazy rendering)
    #[must_use]
    pub const fn visible_after_lookups(mut self, lookups: u32) -> Self {
        self.visible_after_lookups = Some(lookups);
        self
    }

    /// Element only becomes visible once the element matching `trigger` has
    /// received `clicks` script-clicks (simulates an async carousel
    /// transition)
    #[must_use]
    pub fn reveal_after_script_clicks(mut self, trigger: Locator, clicks: u32) -> Self {
        self.reveal_after = Some((trigger, clicks));
        self
    }

    /// Clicking the element navigates the session to `url`
    #[must_use]
    pub fn navigates_to(mut self, url: impl Into<String>) -> Self {
        self.navigates_to = Some(url.into());
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: Vec<MockElement>,
    current_url: String,
    generation: u64,
    quit: bool,
}

/// In-memory [`BrowserDriver`] over a scripted element table.
#[derive(Debug)]
pub struct MockDriver {
    state: Mutex<MockState>,
    viewport: Viewport,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create a driver with an empty document and a 1920x1080 viewport
    #[must_use]
    pub fn new() -> Self {
        Self::with_viewport(Viewport::new(1920, 1080))
    }

    /// Create a driver with an explicit viewport
    #[must_use]
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            state: Mutex::new(MockState {
                current_url: "about:blank".to_string(),
                ..MockState::default()
            }),
            viewport,
        }
    }

    /// Add a scripted element to the document
    pub fn insert(&self, element: MockElement) {
        self.lock().elements.push(element);
    }

    /// Toggle an element's base visibility
    pub fn set_visible(&self, locator: &Locator, visible: bool) {
        let mut state = self.lock();
        if let Some(el) = state.elements.iter_mut().find(|e| &e.locator == locator) {
            el.visible = visible;
        }
    }

    /// Current typed-in value of the element, if any element matches
    #[must_use]
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        self.lock()
            .elements
            .iter()
            .find(|e| &e.locator == locator)
            .map(|e| e.value.clone())
    }

    /// Number of native clicks the element has received
    #[must_use]
    pub fn click_count(&self, locator: &Locator) -> u32 {
        self.counter(locator, |e| e.clicks)
    }

    /// Number of script-clicks the element has received
    #[must_use]
    pub fn script_click_count(&self, locator: &Locator) -> u32 {
        self.counter(locator, |e| e.script_clicks)
    }

    /// Number of scroll-into-view calls the element has received
    #[must_use]
    pub fn scroll_count(&self, locator: &Locator) -> u32 {
        self.counter(locator, |e| e.scrolls)
    }

    /// Whether `quit` has been called
    #[must_use]
    pub fn was_quit(&self) -> bool {
        self.lock().quit
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only happens when a test already panicked
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn counter(&self, locator: &Locator, get: impl Fn(&MockElement) -> u32) -> u32 {
        self.lock()
            .elements
            .iter()
            .find(|e| &e.locator == locator)
            .map_or(0, get)
    }

    /// Effective visibility: base flag, lazy-render threshold, and carousel
    /// reveal condition all have to hold.
    fn is_effectively_visible(state: &MockState, index: usize) -> bool {
        let el = &state.elements[index];
        if !el.visible {
            return false;
        }
        if let Some(needed) = el.visible_after_lookups {
            if el.lookups < needed {
                return false;
            }
        }
        if let Some((ref trigger, needed)) = el.reveal_after {
            let trigger_clicks = state
                .elements
                .iter()
                .find(|e| &e.locator == trigger)
                .map_or(0, |e| e.script_clicks);
            if trigger_clicks < needed {
                return false;
            }
        }
        true
    }

    fn handle_for(state: &MockState, index: usize) -> ElementHandle {
        let el = &state.elements[index];
        ElementHandle {
            id: format!("g{}-{}", state.generation, index),
            tag_name: el.tag_name.clone(),
            bounding_box: Self::is_effectively_visible(state, index).then_some(el.bbox),
            enabled: el.enabled,
        }
    }

    /// Resolve a handle id back to an element index, rejecting handles from
    /// earlier document generations.
    fn resolve(state: &MockState, handle: &ElementHandle) -> NavegarResult<usize> {
        let (generation, index) = handle
            .id
            .strip_prefix('g')
            .and_then(|rest| rest.split_once('-'))
            .and_then(|(g, i)| Some((g.parse::<u64>().ok()?, i.parse::<usize>().ok()?)))
            .ok_or_else(|| NavegarError::Driver {
                message: format!("malformed element id: {}", handle.id),
            })?;
        if generation != state.generation {
            return Err(NavegarError::Driver {
                message: format!("stale element reference: {}", handle.id),
            });
        }
        if index >= state.elements.len() {
            return Err(NavegarError::Driver {
                message: format!("unknown element id: {}", handle.id),
            });
        }
        Ok(index)
    }

    fn find_index(state: &MockState, locator: &Locator) -> Option<usize> {
        state.elements.iter().position(|e| &e.locator == locator)
    }
}

impl BrowserDriver for MockDriver {
    fn navigate(&self, url: &str) -> NavegarResult<()> {
        let mut state = self.lock();
        state.current_url = url.to_string();
        state.generation += 1;
        Ok(())
    }

    fn find_element(&self, locator: &Locator) -> NavegarResult<ElementHandle> {
        let mut state = self.lock();
        let index = Self::find_index(&state, locator).ok_or_else(|| {
            NavegarError::ElementNotFound {
                locator: locator.to_string(),
            }
        })?;
        state.elements[index].lookups += 1;
        Ok(Self::handle_for(&state, index))
    }

    fn find_elements(&self, locator: &Locator) -> NavegarResult<Vec<ElementHandle>> {
        let state = self.lock();
        Ok(state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| &e.locator == locator)
            .map(|(i, _)| Self::handle_for(&state, i))
            .collect())
    }

    fn execute_script(&self, script: &str, args: &[Value]) -> NavegarResult<Value> {
        let mut state = self.lock();
        let target = args
            .first()
            .and_then(|arg| arg.get("element"))
            .and_then(Value::as_str)
            .map(|id| ElementHandle::new(id, ""));
        if let Some(handle) = target {
            let index = Self::resolve(&state, &handle)?;
            if script.contains("click") {
                state.elements[index].script_clicks += 1;
                if let Some(url) = state.elements[index].navigates_to.clone() {
                    state.current_url = url;
                    state.generation += 1;
                }
            }
        }
        Ok(Value::Null)
    }

    fn current_url(&self) -> NavegarResult<String> {
        Ok(self.lock().current_url.clone())
    }

    fn viewport(&self) -> NavegarResult<Viewport> {
        Ok(self.viewport)
    }

    fn scroll_into_view(&self, element: &ElementHandle) -> NavegarResult<()> {
        let mut state = self.lock();
        let index = Self::resolve(&state, element)?;
        let el = &mut state.elements[index];
        el.scrolls += 1;
        // Scrolling brings the element to the top-left of the viewport
        let height = el.bbox.bottom - el.bbox.top;
        let width = el.bbox.right - el.bbox.left;
        el.bbox = BoundingBox::new(10.0, 10.0, 10.0 + height, 10.0 + width);
        Ok(())
    }

    fn click(&self, element: &ElementHandle) -> NavegarResult<()> {
        let mut state = self.lock();
        let index = Self::resolve(&state, element)?;
        if !Self::is_effectively_visible(&state, index) || !state.elements[index].enabled {
            return Err(NavegarError::Driver {
                message: "element not interactable".to_string(),
            });
        }
        state.elements[index].clicks += 1;
        if let Some(url) = state.elements[index].navigates_to.clone() {
            state.current_url = url;
            state.generation += 1;
        }
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> NavegarResult<()> {
        let mut state = self.lock();
        let index = Self::resolve(&state, element)?;
        state.elements[index].value.clear();
        Ok(())
    }

    fn type_text(&self, element: &ElementHandle, text: &str) -> NavegarResult<()> {
        let mut state = self.lock();
        let index = Self::resolve(&state, element)?;
        state.elements[index].value.push_str(text);
        Ok(())
    }

    fn text(&self, element: &ElementHandle) -> NavegarResult<String> {
        let state = self.lock();
        let index = Self::resolve(&state, element)?;
        Ok(state.elements[index].text.clone())
    }

    fn is_displayed(&self, element: &ElementHandle) -> NavegarResult<bool> {
        let state = self.lock();
        let index = Self::resolve(&state, element)?;
        Ok(Self::is_effectively_visible(&state, index))
    }

    fn quit(&self) -> NavegarResult<()> {
        self.lock().quit = true;
        Ok(())
    }
}
