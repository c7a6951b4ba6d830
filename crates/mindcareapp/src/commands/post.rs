use super::write_through::{self, Delivery};
use super::{api_path, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Post, StorageKey, POST_CAP};
use crate::store::{StorageBackend, Store};
use crate::transport::{Request, Transport};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const ROUTE: &str = "/community/post";

/// Persists a post at the head of the board. Every post write goes here,
/// whether it came through the API (raw body) or the local fallback.
pub fn append<B: StorageBackend, T: Serialize>(store: &Store<B>, post: &T) -> Result<usize> {
    store.prepend_capped(StorageKey::Posts, post, POST_CAP)
}

pub fn run<B: StorageBackend, T: Transport + ?Sized>(
    store: &Store<B>,
    transport: &T,
    prefix: &str,
    title: &str,
    content: &str,
    nickname: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let post = Post::new(title, content, nickname, now)?;
    let request = Request::post_json(api_path(prefix, ROUTE), &post)?;

    let delivery = write_through::deliver(transport, &request, || {
        append(store, &post).map(|_| ())
    })?;

    let mut result = CmdResult::default();
    match &delivery {
        Delivery::Remote(_) => result.add_message(CmdMessage::success("Posted anonymously.")),
        Delivery::Local { .. } => result.add_message(CmdMessage::warning(
            "No backend available: post saved locally.",
        )),
    }
    Ok(result.with_posts(vec![post]).with_delivery(delivery))
}

pub fn list<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    let posts: Vec<Post> = store.read_list(StorageKey::Posts);
    let mut result = CmdResult::default();
    if posts.is_empty() {
        result.add_message(CmdMessage::info("No posts yet."));
    }
    result.with_posts(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::RecordingTransport;
    use crate::transport::{ApiClient, Interceptor};

    fn intercepted(store: &Store<MemBackend>) -> ApiClient<MemBackend> {
        ApiClient::offline().with_interceptor(Interceptor::new(store.clone()))
    }

    #[test]
    fn test_post_through_interceptor() {
        let store = Store::new(MemBackend::new());
        let client = intercepted(&store);

        let result = run(&store, &client, "/api", "Hi", "there", "Anon", Utc::now()).unwrap();
        assert!(!result.delivery.unwrap().is_local());

        let posts: Vec<Post> = store.read_list(StorageKey::Posts);
        assert_eq!(posts, result.posts);
    }

    #[test]
    fn test_post_falls_back_locally_when_offline() {
        let store = Store::new(MemBackend::new());
        let client: ApiClient<MemBackend> = ApiClient::offline();

        let result = run(&store, &client, "/api", "Hi", "there", "Anon", Utc::now()).unwrap();
        assert!(result.delivery.unwrap().is_local());

        let posts: Vec<Post> = store.read_list(StorageKey::Posts);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hi");
    }

    #[test]
    fn test_both_paths_store_identical_records() {
        let now = Utc::now();

        let via_api = Store::new(MemBackend::new());
        run(&via_api, &intercepted(&via_api), "/api", "T", "C", "Anon", now).unwrap();

        let via_fallback = Store::new(MemBackend::new());
        let offline: ApiClient<MemBackend> = ApiClient::offline();
        run(&via_fallback, &offline, "/api", "T", "C", "Anon", now).unwrap();

        assert_eq!(
            via_api.read_raw(StorageKey::Posts),
            via_fallback.read_raw(StorageKey::Posts)
        );
    }

    #[test]
    fn test_real_backend_success_does_not_write_locally() {
        let store = Store::new(MemBackend::new());
        let network = RecordingTransport::new();

        run(&store, &network, "/api", "Hi", "there", "Anon", Utc::now()).unwrap();

        assert_eq!(network.calls(), 1);
        assert_eq!(network.requests()[0].path, "/api/community/post");
        assert!(store.read_raw(StorageKey::Posts).is_none());
    }

    #[test]
    fn test_empty_post_is_rejected_before_sending() {
        let store = Store::new(MemBackend::new());
        let network = RecordingTransport::new();
        assert!(run(&store, &network, "/api", " ", "x", "Anon", Utc::now()).is_err());
        assert_eq!(network.calls(), 0);
    }

    #[test]
    fn test_201_posts_leave_200_most_recent_first() {
        let store = Store::new(MemBackend::new());
        let client = intercepted(&store);
        for i in 0..201 {
            run(&store, &client, "/api", &format!("Post {}", i), "c", "Anon", Utc::now()).unwrap();
        }
        let posts = list(&store).posts;
        assert_eq!(posts.len(), 200);
        assert_eq!(posts[0].title, "Post 200");
        assert_eq!(posts[199].title, "Post 1");
    }
}
