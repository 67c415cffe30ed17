/// Marker class DOM-backed hosts use to locate banner containers.
pub const CONTAINER_CLASS: &str = "advisory";

/// Advisory page the banner links to.
pub const STATUS_PAGE_URL: &str = "https://ethsbell.instatus.com";

const FULL_TEXT: &str = "ETHSBell is having issues.<br>Click here for more info.";
const COMPACT_TEXT: &str = "!!!";

/// Available screen dimensions used to pick the banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub avail_width: u32,
    pub avail_height: u32,
}

impl Viewport {
    pub fn new(avail_width: u32, avail_height: u32) -> Self {
        Self {
            avail_width,
            avail_height,
        }
    }

    /// Strictly narrower than 4:3. Exactly 4:3 is not narrow, so the
    /// boundary keeps the full sentence. Integer arithmetic keeps the
    /// comparison exact.
    pub fn is_narrow(&self) -> bool {
        3 * u64::from(self.avail_width) < 4 * u64::from(self.avail_height)
    }
}

/// The set of banner containers on a page. The host owns the containers;
/// the renderer only clears and fills their contents by index.
pub trait BannerHost {
    fn container_count(&self) -> usize;
    fn clear(&mut self, index: usize);
    fn inject(&mut self, index: usize, markup: &str);
}

/// Markup injected into each container when an issue is active: a dismiss
/// control and a link to the advisory page, opening in a new context.
pub fn banner_markup(viewport: Viewport) -> String {
    let text = if viewport.is_narrow() {
        COMPACT_TEXT
    } else {
        FULL_TEXT
    };
    format!(
        "<span class=\"advisory-close\">&times;</span>\
         <a href=\"{STATUS_PAGE_URL}\" target=\"_blank\" class=\"advisory-text\">{text}</a>"
    )
}

/// Reset every container, then populate them all when an issue is active.
/// Clearing first makes the call idempotent.
pub fn render_banners(host: &mut dyn BannerHost, viewport: Viewport, has_issue: bool) {
    for index in 0..host.container_count() {
        host.clear(index);
    }
    if !has_issue {
        return;
    }
    let markup = banner_markup(viewport);
    for index in 0..host.container_count() {
        host.inject(index, &markup);
    }
}

/// Dismiss a single banner. Other containers are left untouched.
pub fn dismiss(host: &mut dyn BannerHost, index: usize) {
    host.clear(index);
}

/// Banner host holding container contents in memory, used by the CLI and
/// by tests in place of a live document.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    containers: Vec<String>,
}

impl InMemoryPage {
    pub fn new(containers: usize) -> Self {
        Self {
            containers: vec![String::new(); containers],
        }
    }

    pub fn contents(&self) -> &[String] {
        &self.containers
    }
}

impl BannerHost for InMemoryPage {
    fn container_count(&self) -> usize {
        self.containers.len()
    }

    fn clear(&mut self, index: usize) {
        if let Some(container) = self.containers.get_mut(index) {
            container.clear();
        }
    }

    fn inject(&mut self, index: usize, markup: &str) {
        if let Some(container) = self.containers.get_mut(index) {
            *container = markup.to_string();
        }
    }
}
