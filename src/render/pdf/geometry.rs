//! Fixed page geometry for export.

/// Page dimensions and layout allowances, all in PDF points.
///
/// Content may never be placed below `height - footer_reserve`; that strip
/// belongs to the page-number footer. The first page additionally reserves a
/// title block, later pages a smaller continuation header.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,

    /// Page height.
    pub height: f32,

    /// Top and side margin.
    pub margin: f32,

    /// Bottom strip reserved for the footer; hard ceiling for content.
    pub footer_reserve: f32,

    /// Extra allowance below the top margin on the first page
    /// (title, generation date, embedded artwork).
    pub title_block: f32,

    /// Extra allowance below the top margin on continuation pages.
    pub continuation: f32,
}

impl PageGeometry {
    /// A4 geometry (210 x 297 mm).
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 48.0,
            footer_reserve: 42.0,
            title_block: 170.0,
            continuation: 24.0,
        }
    }

    /// US Letter geometry (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            ..Self::a4()
        }
    }

    /// Horizontal width available to content.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Offset from page top where content starts on the given page.
    pub fn top_offset(&self, page_index: usize) -> f32 {
        if page_index == 0 {
            self.margin + self.title_block
        } else {
            self.margin + self.continuation
        }
    }

    /// Offset from page top below which content may not extend.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.footer_reserve
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.width, 595.0);
        assert_eq!(geometry.height, 842.0);
        assert!(geometry.content_width() < geometry.width);
    }

    #[test]
    fn test_first_page_has_smaller_allowance() {
        let geometry = PageGeometry::a4();
        assert!(geometry.top_offset(0) > geometry.top_offset(1));
        assert_eq!(geometry.top_offset(1), geometry.top_offset(5));
    }

    #[test]
    fn test_bottom_limit_excludes_footer() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.bottom_limit(), 800.0);
    }
}
