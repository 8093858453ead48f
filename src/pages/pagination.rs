//! Page control for list pages. Page counts come from the server's envelope;
//! nothing here computes them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
    pub pages: Vec<PageLink>,
}

impl Pagination {
    /// `href` maps a one-based page number to the link that selects it.
    pub fn new(current: u32, total: u32, href: impl Fn(u32) -> String) -> Self {
        let pages = (1..=total)
            .map(|number| PageLink {
                number,
                href: href(number),
                selected: number == current,
            })
            .collect();
        Self {
            current,
            total,
            pages,
        }
    }

    /// A single page needs no control.
    pub fn visible(&self) -> bool {
        self.total > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_link_per_server_page() {
        let pagination = Pagination::new(1, 3, |n| format!("/posts?page={}", n));
        assert!(pagination.visible());
        assert_eq!(pagination.pages.len(), 3);
        assert_eq!(pagination.pages[1].href, "/posts?page=2");
        assert!(pagination.pages[0].selected);
        assert!(!pagination.pages[1].selected);
    }

    #[test]
    fn hidden_for_single_page() {
        let pagination = Pagination::new(1, 1, |n| n.to_string());
        assert!(!pagination.visible());
    }

    #[test]
    fn hidden_when_server_reports_nothing() {
        let pagination = Pagination::new(1, 0, |n| n.to_string());
        assert!(pagination.pages.is_empty());
        assert!(!pagination.visible());
    }
}
