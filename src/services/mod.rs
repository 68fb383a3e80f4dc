pub mod clock;
pub mod membership;
pub mod membership_package;
pub mod notification;
pub mod payment;
pub mod payment_type;
pub mod report;
pub mod security;
pub mod sub_user;
pub mod task;
pub mod users;

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Select};

use crate::error::{AppError, Result};
use crate::schemas::{PageQuery, Pagination};

/// Unwrap a required request field, failing with `"<field> is required"`
pub fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

/// Like [`required`], but blank strings count as missing
pub fn required_text(value: Option<String>, field: &str) -> Result<String> {
    match non_blank(value) {
        Some(v) => Ok(v),
        None => Err(AppError::BadRequest(format!("{} is required", field))),
    }
}

/// Trim a string, mapping blank input to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Count and fetch one page of `select`
pub async fn fetch_page<E, C>(
    conn: &C,
    select: Select<E>,
    page: PageQuery,
) -> Result<(Vec<E::Model>, Pagination)>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let page_no = page.page();
    let limit = page.limit();

    let paginator = select.paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_no - 1).await?;

    Ok((items, Pagination::new(total, page_no, limit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_reports_field_name() {
        let err = required::<i64>(None, "payment_type_id").unwrap_err();
        assert_eq!(err.to_string(), "Bad request: payment_type_id is required");
        assert_eq!(required(Some(5), "amount").unwrap(), 5);
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(required_text(Some("   ".to_string()), "Task_name").is_err());
        assert_eq!(
            required_text(Some(" Visit ".to_string()), "Task_name").unwrap(),
            "Visit"
        );
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" TXN-1 ".to_string())), Some("TXN-1".to_string()));
    }
}
