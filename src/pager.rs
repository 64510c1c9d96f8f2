use std::vec::IntoIter;

/// Lazy sequence over an offset-paginated listing.
///
/// `fetch` receives the current offset and returns one page. The cursor
/// advances by the number of items returned; an empty page or an error ends
/// the sequence. The pager cannot be restarted.
///
/// ```no_run
/// # use plurk_oauth::{Client, OffsetPager};
/// # fn run(client: &mut Client) {
/// let friends = OffsetPager::new(|offset: usize| {
///     let cursor = offset.to_string();
///     let mut params = vec![("user_id", "42"), ("limit", "25")];
///     if offset > 0 {
///         params.push(("offset", cursor.as_str()));
///     }
///     client.call_api_json::<Vec<serde_json::Value>, _, _, _>(
///         "FriendsFans/getFriendsByOffset",
///         params,
///     )
/// });
/// for friend in friends {
///     println!("{:?}", friend);
/// }
/// # }
/// ```
pub struct OffsetPager<F, T> {
    fetch: F,
    offset: usize,
    page: IntoIter<T>,
    done: bool,
}

impl<F, T> OffsetPager<F, T> {
    pub fn new(fetch: F) -> Self {
        OffsetPager {
            fetch,
            offset: 0,
            page: Vec::new().into_iter(),
            done: false,
        }
    }

    /// Offset of the next page to fetch.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<F, T, E> Iterator for OffsetPager<F, T>
where
    F: FnMut(usize) -> Result<Vec<T>, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.page.next() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            match (self.fetch)(self.offset) {
                Ok(page) if page.is_empty() => {
                    self.done = true;
                    return None;
                }
                Ok(page) => {
                    self.offset += page.len();
                    self.page = page.into_iter();
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_pages_until_empty() {
        let data: Vec<u32> = (0..7).collect();
        let mut offsets = Vec::new();
        let pager = OffsetPager::new(|offset: usize| -> Result<Vec<u32>, ()> {
            offsets.push(offset);
            Ok(data.iter().skip(offset).take(3).copied().collect())
        });
        let items: Vec<u32> = pager.map(|r| r.unwrap()).collect();
        assert_eq!(items, data);
        assert_eq!(offsets, vec![0, 3, 6, 7]);
    }

    #[test]
    fn stops_after_error() {
        let mut calls = 0;
        let mut pager = OffsetPager::new(|offset: usize| {
            calls += 1;
            if offset == 0 {
                Ok(vec!["a", "b"])
            } else {
                Err("boom")
            }
        });
        assert_eq!(pager.next(), Some(Ok("a")));
        assert_eq!(pager.next(), Some(Ok("b")));
        assert_eq!(pager.offset(), 2);
        assert_eq!(pager.next(), Some(Err("boom")));
        assert_eq!(pager.next(), None);
        drop(pager);
        assert_eq!(calls, 2);
    }
}
