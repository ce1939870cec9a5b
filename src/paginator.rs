use crate::error::{BlogError, Result};

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = (items.len() as u32).div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages are 1-based.
    pub fn get_page(&self, page: u32) -> Result<&'a [T]> {
        match page {
            0 => return Err(BlogError::InvalidInput("Page has to be greater than 0".to_string())),
            x if x > self.page_count => return Err(BlogError::InvalidInput(format!("Page has to be less than page_count ({})", self.page_count))),
            _ => {}
        };

        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        Ok(&self.items[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 5);
        assert_eq!(paginator.get_page(1).unwrap(), &[1, 2, 3]);
        assert_eq!(paginator.get_page(4).unwrap(), &[10, 11, 12]);
        assert_eq!(paginator.get_page(5).unwrap(), &[13]);

        assert_eq!(paginator.get_page(0).unwrap_err().to_string(), "Invalid input: Page has to be greater than 0");
        assert_eq!(paginator.get_page(6).unwrap_err().to_string(), "Invalid input: Page has to be less than page_count (5)");
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(&items, 3);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.get_page(1).is_err());
    }
}
