//! The user identifier is shared with the listing domain (listing owner,
//! review author), so it lives in the kernel.

pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_v4() {
        assert_eq!(UserId::new().as_uuid().get_version_num(), 4);
    }
}
