//! Cross-cutting request types
//!
//! The principal is supplied by the (external) auth middleware; the core
//! trusts it but still filters every storage call by the path shop id.

use serde::{Deserialize, Serialize};

/// Caller role, as asserted by the auth middleware
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Owner,
    Staff,
    Customer,
}

/// Authenticated principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    /// Shop binding for owner/staff principals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
}

/// Pagination query parameters (1-based page)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    /// Number of records to skip: (page - 1) * limit
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, query: PageQuery) -> Self {
        let total_pages = if query.limit == 0 {
            0
        } else {
            total.div_ceil(query.limit)
        };
        Self {
            items,
            total,
            page: query.page,
            limit: query.limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_skip() {
        let q = PageQuery { page: 1, limit: 20 };
        assert_eq!(q.skip(), 0);
        let q = PageQuery { page: 3, limit: 10 };
        assert_eq!(q.skip(), 20);
        // Page 0 is treated as page 1
        let q = PageQuery { page: 0, limit: 10 };
        assert_eq!(q.skip(), 0);
    }

    #[test]
    fn test_total_pages_ceiling() {
        let q = PageQuery { page: 1, limit: 10 };
        let resp: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 21, q);
        assert_eq!(resp.total_pages, 3);
        let resp: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 20, q);
        assert_eq!(resp.total_pages, 2);
        let resp: PaginatedResponse<u8> = PaginatedResponse::new(vec![], 0, q);
        assert_eq!(resp.total_pages, 0);
    }
}
