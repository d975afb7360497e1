pub const PAGE_SIZE: usize = 50;

/// One page of a filtered list.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub index: usize,
	pub count: usize,
	pub matches: usize,
}

/// Filter and page position for the node and link tables.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPager {
	page_size: usize,
	page: usize,
	filter: String,
}

impl Default for ListPager {
	fn default() -> Self {
		Self::new(PAGE_SIZE)
	}
}

impl ListPager {
	pub fn new(page_size: usize) -> Self {
		Self {
			page_size: page_size.max(1),
			page: 0,
			filter: String::new(),
		}
	}

	pub fn filter(&self) -> &str {
		&self.filter
	}

	/// Changing the filter goes back to the first page.
	pub fn set_filter(&mut self, filter: &str) {
		let filter = filter.trim().to_lowercase();
		if filter != self.filter {
			self.filter = filter;
			self.page = 0;
		}
	}

	pub fn reset(&mut self) {
		self.page = 0;
		self.filter.clear();
	}

	/// Jumps to `index`; the next `paginate` clamps it.
	pub fn show_page(&mut self, index: usize) {
		self.page = index;
	}

	fn matches(&self, text: &str) -> bool {
		self.filter.is_empty() || text.to_lowercase().contains(&self.filter)
	}

	/// Filters `items` by `text` and cuts out the current page.
	///
	/// The page index is clamped to the last available page. A pager that is
	/// only read from a snapshot should move with `show_page` relative to the
	/// returned `Page::index`.
	pub fn paginate<T>(&mut self, items: impl IntoIterator<Item = T>, text: impl Fn(&T) -> String) -> Page<T> {
		let filtered: Vec<T> = items.into_iter().filter(|item| self.matches(&text(item))).collect();
		let matches = filtered.len();
		let count = matches.div_ceil(self.page_size).max(1);
		self.page = self.page.min(count - 1);
		let items = filtered
			.into_iter()
			.skip(self.page * self.page_size)
			.take(self.page_size)
			.collect();
		Page {
			items,
			index: self.page,
			count,
			matches,
		}
	}
}

/// `1234567` -> `1,234,567`.
pub fn format_number(n: usize) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0, "0")]
	#[case(999, "999")]
	#[case(1000, "1,000")]
	#[case(12345, "12,345")]
	#[case(1234567, "1,234,567")]
	fn formats_with_separators(#[case] n: usize, #[case] expected: &str) {
		assert_eq!(format_number(n), expected);
	}

	fn names(n: usize) -> Vec<String> {
		(0..n).map(|i| format!("node-{i}")).collect()
	}

	#[test]
	fn pages_through_items() {
		let mut pager = ListPager::default();
		let page = pager.paginate(names(120), String::clone);
		assert_eq!((page.index, page.count, page.matches), (0, 3, 120));
		assert_eq!(page.items.len(), 50);

		pager.show_page(2);
		let page = pager.paginate(names(120), String::clone);
		assert_eq!(page.items.len(), 20);
		assert_eq!(page.items[0], "node-100");
	}

	#[test]
	fn page_clamps_to_last() {
		let mut pager = ListPager::new(10);
		pager.show_page(9);
		let page = pager.paginate(names(25), String::clone);
		assert_eq!(page.index, 2);
		pager.show_page(page.index - 1);
		assert_eq!(pager.paginate(names(25), String::clone).index, 1);
	}

	#[test]
	fn filter_is_case_insensitive_and_resets_page() {
		let mut pager = ListPager::new(10);
		pager.show_page(1);
		pager.set_filter("  NODE-1 ");
		assert_eq!(pager.filter(), "node-1");
		let page = pager.paginate(names(120), String::clone);
		// node-1, node-10..19, node-100..119
		assert_eq!(page.matches, 31);
		assert_eq!(page.index, 0);
	}

	#[test]
	fn empty_list_has_one_page() {
		let mut pager = ListPager::default();
		pager.set_filter("zzz");
		let page = pager.paginate(names(5), String::clone);
		assert_eq!((page.index, page.count, page.matches), (0, 1, 0));
		assert!(page.items.is_empty());
		pager.reset();
		assert_eq!(pager.filter(), "");
	}

	#[test]
	fn snapshot_navigation_moves_from_shown_page() {
		let mut pager = ListPager::new(10);
		pager.show_page(9);
		// Paginating a copy leaves the stored page out of range.
		let shown = pager.clone().paginate(names(25), String::clone);
		assert_eq!(shown.index, 2);
		pager.show_page(shown.index.saturating_sub(1));
		assert_eq!(pager.clone().paginate(names(25), String::clone).index, 1);
	}
}
