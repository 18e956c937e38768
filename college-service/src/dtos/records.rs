use serde::Deserialize;

use crate::services::Page;

/// Optional `?skip=&limit=` window on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl From<ListParams> for Page {
    fn from(params: ListParams) -> Self {
        Page {
            skip: params.skip,
            limit: params.limit,
        }
    }
}
