use async_graphql::{Request, Response, Variables};
use blogql::graphql::{BlogSchema, GlobalId, NodeType, build_schema};
use blogql::storage::Database;
use serde_json::{Value, json};
use tempfile::TempDir;

struct TestBlog {
    _dir: TempDir,
    db: Database,
    schema: BlogSchema,
}

async fn setup() -> TestBlog {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.sqlite"), 2)
        .await
        .unwrap();
    let schema = build_schema(db.clone());
    TestBlog {
        _dir: dir,
        db,
        schema,
    }
}

impl TestBlog {
    async fn raw(&self, query: &str, variables: Value) -> Response {
        self.schema
            .execute(Request::new(query).variables(Variables::from_json(variables)))
            .await
    }

    async fn execute(&self, query: &str, variables: Value) -> Value {
        let response = self.raw(query, variables).await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    async fn create_post(&self, title: &str, body: &str, username: &str) -> Value {
        let data = self
            .execute(
                CREATE_POST,
                json!({ "title": title, "body": body, "username": username }),
            )
            .await;
        data["createPost"]["post"].clone()
    }
}

const CREATE_POST: &str = r#"
    mutation Create($title: String!, $body: String!, $username: String!) {
        createPost(title: $title, body: $body, username: $username) {
            post { id databaseId title body author { id username } }
        }
    }
"#;

const ALL_POSTS: &str = r#"
    query Posts($first: Int, $after: String, $last: Int, $before: String) {
        allPosts(first: $first, after: $after, last: $last, before: $before) {
            totalCount
            pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
            edges { cursor node { databaseId title } }
        }
    }
"#;

fn titles(connection: &Value) -> Vec<String> {
    connection["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["title"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// createPost
// =============================================================================

#[tokio::test]
async fn test_create_post_with_existing_author() {
    let blog = setup().await;
    let john = blog.db.users().create("john2").await.unwrap();

    let post = blog
        .create_post("Hello World", "This is the first post", "john2")
        .await;

    assert_eq!(post["title"], "Hello World");
    assert_eq!(post["body"], "This is the first post");
    assert_eq!(post["author"]["username"], "john2");
    assert_eq!(
        post["author"]["id"],
        GlobalId::new(NodeType::User, john.id).encode()
    );
}

#[tokio::test]
async fn test_create_post_with_unknown_author_succeeds_without_author() {
    let blog = setup().await;
    blog.db.users().create("john2").await.unwrap();

    let post = blog.create_post("Orphan", "No one wrote this", "nobody").await;

    assert_eq!(post["title"], "Orphan");
    assert!(post["author"].is_null());
    assert_eq!(blog.db.posts().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_username_match_is_exact() {
    let blog = setup().await;
    blog.db.users().create("john2").await.unwrap();

    let post = blog.create_post("Case", "", "JOHN2").await;
    assert!(post["author"].is_null());
}

#[tokio::test]
async fn test_overlong_username_creates_post_without_author() {
    let blog = setup().await;
    let username = "x".repeat(300);

    let post = blog.create_post("Hello", "body", &username).await;

    assert!(post["author"].is_null());
    assert_eq!(blog.db.posts().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_long_title_and_body_are_accepted() {
    let blog = setup().await;
    let title = "t".repeat(300);
    let body = "b".repeat(60_000);

    let post = blog.create_post(&title, &body, "nobody").await;

    assert_eq!(post["title"].as_str().unwrap().len(), 300);
    assert_eq!(post["body"].as_str().unwrap().len(), 60_000);
    assert_eq!(blog.db.posts().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_identical_create_calls_insert_two_rows() {
    let blog = setup().await;

    let first = blog.create_post("Same", "Same body", "x").await;
    let second = blog.create_post("Same", "Same body", "x").await;

    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["databaseId"], second["databaseId"]);

    let data = blog.execute(ALL_POSTS, json!({})).await;
    assert_eq!(data["allPosts"]["totalCount"], 2);
}

#[tokio::test]
async fn test_empty_title_is_rejected_without_insert() {
    let blog = setup().await;

    let response = blog
        .raw(
            CREATE_POST,
            json!({ "title": "", "body": "b", "username": "x" }),
        )
        .await;

    assert!(!response.errors.is_empty());
    assert_eq!(blog.db.posts().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_argument_fails_validation() {
    let blog = setup().await;

    let response = blog
        .raw(
            r#"mutation { createPost(title: "t", body: "b") { post { id } } }"#,
            json!({}),
        )
        .await;

    assert!(!response.errors.is_empty());
    assert_eq!(blog.db.posts().count().await.unwrap(), 0);
}

// =============================================================================
// Connections
// =============================================================================

#[tokio::test]
async fn test_all_posts_forward_pages_cover_table_in_order() {
    let blog = setup().await;
    let expected: Vec<String> = (1..=5).map(|i| format!("Post {}", i)).collect();
    for title in &expected {
        blog.create_post(title, "", "x").await;
    }

    let mut seen = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let data = blog
            .execute(ALL_POSTS, json!({ "first": 2, "after": after }))
            .await;
        let connection = &data["allPosts"];
        assert_eq!(connection["totalCount"], 5);
        seen.extend(titles(connection));

        let page_info = &connection["pageInfo"];
        if !page_info["hasNextPage"].as_bool().unwrap() {
            break;
        }
        after = page_info["endCursor"].as_str().map(String::from);
    }

    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_all_posts_without_arguments_returns_every_row() {
    let blog = setup().await;
    let model = blogql::model::NewPost::new("Bulk".to_string(), String::new());
    for _ in 0..150 {
        blog.db.posts().create(&model).await.unwrap();
    }

    let data = blog.execute(ALL_POSTS, json!({})).await;
    let connection = &data["allPosts"];
    assert_eq!(connection["edges"].as_array().unwrap().len(), 150);
    assert_eq!(connection["totalCount"], 150);
    assert_eq!(connection["pageInfo"]["hasNextPage"], false);

    let data = blog.execute(ALL_POSTS, json!({ "first": 150 })).await;
    let connection = &data["allPosts"];
    assert_eq!(connection["edges"].as_array().unwrap().len(), 150);
    assert_eq!(connection["pageInfo"]["hasNextPage"], false);

    let data = blog.execute(ALL_POSTS, json!({ "first": 120 })).await;
    let connection = &data["allPosts"];
    assert_eq!(connection["edges"].as_array().unwrap().len(), 120);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
}

#[tokio::test]
async fn test_all_posts_backward_page() {
    let blog = setup().await;
    for i in 1..=4 {
        blog.create_post(&format!("Post {}", i), "", "x").await;
    }

    let data = blog.execute(ALL_POSTS, json!({ "last": 2 })).await;
    let connection = &data["allPosts"];
    assert_eq!(titles(connection), vec!["Post 3", "Post 4"]);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], true);
    assert_eq!(connection["pageInfo"]["hasNextPage"], false);

    let before = connection["pageInfo"]["startCursor"].as_str().unwrap();
    let data = blog
        .execute(ALL_POSTS, json!({ "last": 2, "before": before }))
        .await;
    let connection = &data["allPosts"];
    assert_eq!(titles(connection), vec!["Post 1", "Post 2"]);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], false);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
}

#[tokio::test]
async fn test_all_users_ordered_by_primary_key() {
    let blog = setup().await;
    for name in ["zed", "amy", "kim"] {
        blog.db.users().create(name).await.unwrap();
    }

    let data = blog
        .execute(
            "{ allUsers { totalCount edges { node { username databaseId } } } }",
            json!({}),
        )
        .await;

    let names: Vec<&str> = data["allUsers"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["zed", "amy", "kim"]);
    assert_eq!(data["allUsers"]["totalCount"], 3);
}

#[tokio::test]
async fn test_all_users_forward_pages_cover_table_in_order() {
    let blog = setup().await;
    let expected: Vec<String> = (1..=7).map(|i| format!("user{}", i)).collect();
    for name in &expected {
        blog.db.users().create(name).await.unwrap();
    }

    let query = r#"
        query Users($first: Int, $after: String) {
            allUsers(first: $first, after: $after) {
                totalCount
                pageInfo { hasNextPage endCursor }
                edges { node { username } }
            }
        }
    "#;

    let mut seen = Vec::new();
    let mut pages = 0;
    let mut after: Option<String> = None;
    loop {
        let data = blog
            .execute(query, json!({ "first": 3, "after": after }))
            .await;
        let connection = &data["allUsers"];
        assert_eq!(connection["totalCount"], 7);
        pages += 1;
        seen.extend(
            connection["edges"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["node"]["username"].as_str().unwrap().to_string()),
        );

        let page_info = &connection["pageInfo"];
        if !page_info["hasNextPage"].as_bool().unwrap() {
            break;
        }
        after = page_info["endCursor"].as_str().map(String::from);
    }

    assert_eq!(pages, 3);
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_user_posts_connection_only_lists_own_posts() {
    let blog = setup().await;
    blog.db.users().create("john2").await.unwrap();
    blog.create_post("Mine", "", "john2").await;
    blog.create_post("Not mine", "", "someone").await;
    blog.create_post("Also mine", "", "john2").await;

    let data = blog
        .execute(
            "{ allUsers { edges { node { posts(first: 10) { totalCount edges { node { title } } } } } } }",
            json!({}),
        )
        .await;

    let posts = &data["allUsers"]["edges"][0]["node"]["posts"];
    assert_eq!(posts["totalCount"], 2);
    assert_eq!(titles(posts), vec!["Mine", "Also mine"]);
}

#[tokio::test]
async fn test_negative_first_is_an_error() {
    let blog = setup().await;
    let response = blog.raw(ALL_POSTS, json!({ "first": -1 })).await;
    assert!(!response.errors.is_empty());
}

#[tokio::test]
async fn test_malformed_cursor_is_an_error() {
    let blog = setup().await;
    let response = blog
        .raw(ALL_POSTS, json!({ "first": 1, "after": "not-a-cursor" }))
        .await;
    assert!(!response.errors.is_empty());
}

// =============================================================================
// node
// =============================================================================

const NODE: &str = r#"
    query Node($id: ID!) {
        node(id: $id) {
            id
            ... on User { username }
            ... on Post { title }
        }
    }
"#;

#[tokio::test]
async fn test_node_resolves_users_and_posts() {
    let blog = setup().await;
    let john = blog.db.users().create("john2").await.unwrap();
    let post = blog.create_post("Hello World", "", "john2").await;

    let user_id = GlobalId::new(NodeType::User, john.id).encode();
    let data = blog.execute(NODE, json!({ "id": user_id })).await;
    assert_eq!(data["node"]["username"], "john2");
    assert_eq!(data["node"]["id"], user_id);

    let data = blog.execute(NODE, json!({ "id": post["id"] })).await;
    assert_eq!(data["node"]["title"], "Hello World");
}

#[tokio::test]
async fn test_node_type_is_part_of_the_id() {
    let blog = setup().await;
    let john = blog.db.users().create("john2").await.unwrap();

    // Same primary key, other type: no post with that key exists.
    let as_post = GlobalId::new(NodeType::Post, john.id).encode();
    let data = blog.execute(NODE, json!({ "id": as_post })).await;
    assert!(data["node"].is_null());
}

#[tokio::test]
async fn test_node_returns_null_for_unknown_ids() {
    let blog = setup().await;

    let missing = GlobalId::new(NodeType::Post, 999).encode();
    let data = blog.execute(NODE, json!({ "id": missing })).await;
    assert!(data["node"].is_null());

    let data = blog.execute(NODE, json!({ "id": "garbage" })).await;
    assert!(data["node"].is_null());
}
