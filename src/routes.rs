/// Page names the navigation understands. Targets are bare file names such as
/// `blog.html`, compared against the last segment of `location.pathname`.
#[derive(Clone, Debug, PartialEq)]
pub struct Routes<'a> {
    pub home: &'a str,
    pub index: &'a str,
}

impl<'a> Routes<'a> {
    /// Last path segment, or the home page for `/` and the empty path.
    pub fn current_page<'p>(&self, pathname: &'p str) -> &'p str
        where 'a: 'p
    {
        match pathname.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment,
            _ => self.home,
        }
    }

    /// Whether a navigation target points at `current`; the index page is the home page.
    pub fn targets(&self, href: &str, current: &str) -> bool {
        href == current || (current == self.index && href == self.home)
    }
}
