//! 列表分页
//!
//! 三级列表各自持有一个 [`PageCursor`]，可见子集由 [`paginate`] 计算。

use serde::Serialize;

/// 环境列表每页条数
pub const ENVIRONMENT_PAGE_SIZE: usize = 14;
/// KVM 列表每页条数
pub const KVM_PAGE_SIZE: usize = 13;
/// 条目列表每页条数
pub const ENTRY_PAGE_SIZE: usize = 7;

/// 单页切片及导航标志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub subset: &'a [T],
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// 取出第 `page` 页（从 0 开始）
///
/// 超出末页时返回空切片。`page_size` 为 0 时按 1 处理。
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        subset: &items[start..end],
        total,
        has_prev: page > 0,
        has_next: page.saturating_add(1).saturating_mul(page_size) < total,
    }
}

/// 单级列表的分页游标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    page: usize,
    page_size: usize,
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 总页数，空列表也算一页
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// 翻到下一页；已在末页时忽略并返回 `false`
    pub fn next(&mut self, total: usize) -> bool {
        if (self.page + 1) * self.page_size < total {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// 翻到上一页；已在首页时返回 `false`
    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// 列表缩短后退回到最后一个存在的页
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page() {
        let items: Vec<u32> = (0..20).collect();
        let page = paginate(&items, 0, 7);
        assert_eq!(page.subset, &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(page.total, 20);
        assert!(!page.has_prev);
        assert!(page.has_next);
    }

    #[test]
    fn last_partial_page() {
        let items: Vec<u32> = (0..20).collect();
        let page = paginate(&items, 2, 7);
        assert_eq!(page.subset, &[14, 15, 16, 17, 18, 19]);
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn exact_multiple_has_no_next_on_last_page() {
        let items: Vec<u32> = (0..14).collect();
        let page = paginate(&items, 0, 14);
        assert_eq!(page.subset.len(), 14);
        assert!(!page.has_next);
    }

    #[test]
    fn page_beyond_end_is_empty() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 5, 13);
        assert!(page.subset.is_empty());
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn empty_items() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 0, 7);
        assert!(page.subset.is_empty());
        assert_eq!(page.total, 0);
        assert!(!page.has_prev && !page.has_next);
    }

    #[test]
    fn pages_partition_items() {
        for len in [0usize, 1, 6, 7, 8, 13, 14, 29] {
            for size in [1usize, 7, 13, 14] {
                let items: Vec<usize> = (0..len).collect();
                let mut rebuilt = Vec::new();
                let mut page = 0;
                loop {
                    let p = paginate(&items, page, size);
                    assert!(p.subset.len() <= size);
                    rebuilt.extend_from_slice(p.subset);
                    if !p.has_next {
                        break;
                    }
                    page += 1;
                }
                assert_eq!(rebuilt, items, "len={len} size={size}");
            }
        }
    }

    #[test]
    fn cursor_next_ignored_past_last_page() {
        let mut cursor = PageCursor::new(7);
        assert!(cursor.next(10));
        assert_eq!(cursor.page(), 1);
        assert!(!cursor.next(10));
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn cursor_prev_stops_at_zero() {
        let mut cursor = PageCursor::new(13);
        assert!(!cursor.prev());
        cursor.next(30);
        assert!(cursor.prev());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn cursor_clamps_after_shrink() {
        let mut cursor = PageCursor::new(7);
        cursor.next(30);
        cursor.next(30);
        cursor.next(30);
        assert_eq!(cursor.page(), 3);

        cursor.clamp(10);
        assert_eq!(cursor.page(), 1);
        assert!(cursor.page() * cursor.page_size() < 10);

        cursor.clamp(0);
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn page_count_counts_empty_as_one() {
        let cursor = PageCursor::new(14);
        assert_eq!(cursor.page_count(0), 1);
        assert_eq!(cursor.page_count(14), 1);
        assert_eq!(cursor.page_count(15), 2);
    }
}
