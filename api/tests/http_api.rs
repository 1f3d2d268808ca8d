use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use quickcourt_api::bootstrap::app_context::{AppContext, AppServices};
use quickcourt_api::bootstrap::config::Config;
use quickcourt_api::presentation::http::router;

const PASSWORD: &str = "s3cret-pass";

struct TestApp {
    router: Router,
}

struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

impl TestApp {
    fn new() -> Self {
        let cfg = Config::for_tests();
        let services = AppServices::memory(&cfg);
        Self {
            router: router(AppContext::new(cfg, services)),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> Response {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Response {
            status,
            headers,
            body,
        }
    }

    async fn register(&self, name: &str, email: &str, role: &str) -> Value {
        let mut payload = json!({
            "name": name,
            "email": email,
            "password": PASSWORD,
            "phone": "9876543210",
            "role": role,
        });
        if role == "admin" {
            payload["adminKey"] = json!("admin-key");
        }
        let res = self
            .send(Method::POST, "/api/users/send-otp", None, Some(payload))
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);

        let res = self
            .send(
                Method::POST,
                "/api/users/verify-otp",
                None,
                Some(json!({ "email": email, "otp": "111111" })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        res.body["user"].clone()
    }

    async fn login(&self, email: &str) -> String {
        let res = self
            .send(
                Method::POST,
                "/api/users/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        res.body["access_token"].as_str().unwrap().to_string()
    }

    async fn signed_up(&self, name: &str, email: &str, role: &str) -> (Value, String) {
        let user = self.register(name, email, role).await;
        let token = self.login(email).await;
        (user, token)
    }
}

fn future_date(days: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn venue_payload() -> Value {
    json!({
        "name": "Elite Tennis Academy",
        "address": "Bandra West, Mumbai",
        "description": "Clay and hard courts",
        "sports": [
            { "name": "Tennis", "price_per_hour": 500.0 },
            { "name": "Badminton", "pricePerHour": 300.0 }
        ],
        "amenities": ["Parking", " ", "Showers"],
        "photos": []
    })
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let app = TestApp::new();
    let res = app.send(Method::GET, "/api/nope", None, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({ "success": false, "message": "Not Found" }));
}

#[tokio::test]
async fn health_reports_ok_on_memory_backend() {
    let app = TestApp::new();
    let res = app.send(Method::GET, "/api/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let res = app.send(Method::GET, "/api/openapi.json", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["paths"]["/api/bookings"].is_object());
    let schemas = &res.body["components"]["schemas"];
    for name in ["MessageResponse", "UserEnvelope", "VenueListEnvelope", "BookingEnvelope", "StatsEnvelope"] {
        assert!(schemas[name].is_object(), "missing schema {name}");
    }
}

#[tokio::test]
async fn registration_login_and_session_cookie() {
    let app = TestApp::new();
    let user = app.register("Asha", "Asha@Example.com", "player").await;
    assert_eq!(user["email"], "asha@example.com");
    assert_eq!(user["role"], "player");
    assert!(user.get("password_hash").is_none());

    let res = app
        .send(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    let cookie = res.headers[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    // The cookie alone authenticates
    let session = cookie.split(';').next().unwrap().to_string();
    let req = Request::builder()
        .uri("/api/users/me")
        .header(header::COOKIE, session)
        .body(Body::empty())
        .unwrap();
    let me = app.dispatch(req).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["name"], "Asha");

    let out = app.send(Method::POST, "/api/users/logout", None, None).await;
    assert_eq!(out.status, StatusCode::OK);
    assert!(out.headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
}

#[tokio::test]
async fn registration_errors() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com", "player").await;

    let dup = app
        .send(
            Method::POST,
            "/api/users/send-otp",
            None,
            Some(json!({ "name": "A", "email": "asha@example.com", "password": "x", "role": "owner" })),
        )
        .await;
    assert_eq!(dup.status, StatusCode::BAD_REQUEST);
    assert_eq!(dup.body["message"], "Email already registered");

    let bad_role = app
        .send(
            Method::POST,
            "/api/users/send-otp",
            None,
            Some(json!({ "name": "B", "email": "b@example.com", "password": "x", "role": "coach" })),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

    let wrong_key = app
        .send(
            Method::POST,
            "/api/users/send-otp",
            None,
            Some(json!({ "name": "C", "email": "c@example.com", "password": "x", "role": "admin", "adminKey": "nope" })),
        )
        .await;
    assert_eq!(wrong_key.status, StatusCode::FORBIDDEN);

    let no_pending = app
        .send(
            Method::POST,
            "/api/users/verify-otp",
            None,
            Some(json!({ "email": "ghost@example.com", "otp": "111111" })),
        )
        .await;
    assert_eq!(no_pending.status, StatusCode::NOT_FOUND);

    let malformed = app
        .send(Method::POST, "/api/users/login", None, Some(json!("not an object")))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["success"], false);
}

#[tokio::test]
async fn login_failures() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com", "player").await;

    let unknown = app
        .send(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let wrong = app
        .send(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = TestApp::new();
    let res = app.send(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    let res = app
        .send(Method::GET, "/api/users/me", Some("garbage"), None)
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_user_management_and_bans() {
    let app = TestApp::new();
    let (_, admin) = app.signed_up("Root", "root@example.com", "admin").await;
    let (player, player_token) = app.signed_up("Asha", "asha@example.com", "player").await;
    let player_id = player["id"].as_str().unwrap().to_string();

    let denied = app
        .send(Method::GET, "/api/users", Some(&player_token), None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let list = app.send(Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"].as_array().unwrap().len(), 2);

    let created = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({ "name": "Ravi", "email": "ravi@example.com", "password": "pw", "role": "owner" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["role"], "owner");

    let taken = app
        .send(
            Method::PUT,
            &format!("/api/users/{player_id}"),
            Some(&admin),
            Some(json!({ "email": "ravi@example.com" })),
        )
        .await;
    assert_eq!(taken.status, StatusCode::BAD_REQUEST);

    let banned = app
        .send(
            Method::PATCH,
            &format!("/api/users/{player_id}/ban"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(banned.status, StatusCode::OK);
    assert_eq!(banned.body["data"]["is_banned"], true);

    // Existing tokens stop working and new logins are refused
    let me = app
        .send(Method::GET, "/api/users/me", Some(&player_token), None)
        .await;
    assert_eq!(me.status, StatusCode::FORBIDDEN);
    let relogin = app
        .send(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(relogin.status, StatusCode::FORBIDDEN);
    assert_eq!(relogin.body["message"], "Account banned");

    let deleted = app
        .send(
            Method::DELETE,
            &format!("/api/users/{player_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "User deleted");
    let gone = app
        .send(
            Method::GET,
            &format!("/api/users/{player_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn venue_approval_booking_and_stats() {
    let app = TestApp::new();
    let (_, admin) = app.signed_up("Root", "root@example.com", "admin").await;
    let (_, owner) = app.signed_up("Ravi", "ravi@example.com", "owner").await;
    let (_, player) = app.signed_up("Asha", "asha@example.com", "player").await;

    let forbidden = app
        .send(Method::POST, "/api/venues", Some(&player), Some(venue_payload()))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let created = app
        .send(Method::POST, "/api/venues", Some(&owner), Some(venue_payload()))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["status"], "pending");
    assert_eq!(
        created.body["data"]["amenities"],
        json!(["Parking", "Showers"])
    );
    let venue_id = created.body["data"]["id"].as_str().unwrap().to_string();

    // Pending venues are hidden from the public
    let public = app.send(Method::GET, "/api/venues", None, None).await;
    assert!(public.body["data"].as_array().unwrap().is_empty());
    let hidden = app
        .send(Method::GET, &format!("/api/venues/{venue_id}"), Some(&player), None)
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
    let own = app
        .send(Method::GET, &format!("/api/venues/{venue_id}"), Some(&owner), None)
        .await;
    assert_eq!(own.status, StatusCode::OK);

    let booking = json!({
        "venue_id": venue_id,
        "sport": "tennis",
        "date": future_date(3),
        "start_time": "10:00",
        "end_time": "11:30",
    });
    let not_approved = app
        .send(Method::POST, "/api/bookings", Some(&player), Some(booking.clone()))
        .await;
    assert_eq!(not_approved.status, StatusCode::BAD_REQUEST);

    let approved = app
        .send(
            Method::PATCH,
            &format!("/api/venues/{venue_id}/status"),
            Some(&admin),
            Some(json!({ "status": "approved" })),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["data"]["status"], "approved");

    let search = app
        .send(Method::GET, "/api/venues?sport=BADMINTON&q=mumbai", None, None)
        .await;
    assert_eq!(search.body["data"].as_array().unwrap().len(), 1);

    let booked = app
        .send(Method::POST, "/api/bookings", Some(&player), Some(booking.clone()))
        .await;
    assert_eq!(booked.status, StatusCode::CREATED, "{:?}", booked.body);
    assert_eq!(booked.body["data"]["sport"], "Tennis");
    assert_eq!(booked.body["data"]["total_price"], 750.0);
    assert_eq!(booked.body["data"]["status"], "confirmed");
    let booking_id = booked.body["data"]["id"].as_str().unwrap().to_string();

    let overlap = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&owner),
            Some(json!({
                "venueId": venue_id,
                "sport": "Tennis",
                "date": future_date(3),
                "startTime": "11:00",
                "endTime": "12:00",
            })),
        )
        .await;
    assert_eq!(overlap.status, StatusCode::CONFLICT);

    let adjacent = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&owner),
            Some(json!({
                "venue_id": venue_id,
                "sport": "Tennis",
                "date": future_date(3),
                "start_time": "11:30",
                "end_time": "12:00",
            })),
        )
        .await;
    assert_eq!(adjacent.status, StatusCode::CREATED);

    let inverted = app
        .send(
            Method::POST,
            "/api/bookings",
            Some(&player),
            Some(json!({
                "venue_id": venue_id,
                "sport": "Tennis",
                "date": future_date(4),
                "start_time": "12:00",
                "end_time": "11:00",
            })),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let mine = app
        .send(Method::GET, "/api/bookings/me", Some(&player), None)
        .await;
    assert_eq!(mine.body["data"].as_array().unwrap().len(), 1);

    let venue_bookings = app
        .send(
            Method::GET,
            &format!("/api/venues/{venue_id}/bookings"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(venue_bookings.status, StatusCode::OK);
    assert_eq!(venue_bookings.body["data"].as_array().unwrap().len(), 2);
    let other_denied = app
        .send(
            Method::GET,
            &format!("/api/venues/{venue_id}/bookings"),
            Some(&player),
            None,
        )
        .await;
    assert_eq!(other_denied.status, StatusCode::FORBIDDEN);

    let all_denied = app
        .send(Method::GET, "/api/bookings", Some(&player), None)
        .await;
    assert_eq!(all_denied.status, StatusCode::FORBIDDEN);

    let cancelled = app
        .send(
            Method::PATCH,
            &format!("/api/bookings/{booking_id}/cancel"),
            Some(&player),
            None,
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["data"]["status"], "cancelled");
    let again = app
        .send(
            Method::PATCH,
            &format!("/api/bookings/{booking_id}/cancel"),
            Some(&player),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    // The freed slot can be booked again
    let rebooked = app
        .send(Method::POST, "/api/bookings", Some(&player), Some(booking))
        .await;
    assert_eq!(rebooked.status, StatusCode::CREATED);

    let stats = app
        .send(Method::GET, "/api/users/admin/stats", Some(&admin), None)
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    let data = &stats.body["data"];
    assert_eq!(data["users"], json!({ "total": 3, "banned": 0 }));
    assert_eq!(
        data["venues"],
        json!({ "total": 1, "approved": 1, "pending": 0 })
    );
    assert_eq!(data["bookings"]["total"], 3);
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(
        data["bookings"]["trend"],
        json!([{ "date": today, "count": 3 }])
    );

    let stats_denied = app
        .send(Method::GET, "/api/users/admin/stats", Some(&owner), None)
        .await;
    assert_eq!(stats_denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn password_reset_round_trip() {
    let app = TestApp::new();
    app.register("Asha", "asha@example.com", "player").await;

    let issued = app
        .send(
            Method::POST,
            "/api/users/forgot-password",
            None,
            Some(json!({ "email": "asha@example.com" })),
        )
        .await;
    assert_eq!(issued.status, StatusCode::OK);
    let token = issued.body["reset_token"].as_str().unwrap().to_string();

    let reset = app
        .send(
            Method::POST,
            "/api/users/reset-password",
            None,
            Some(json!({ "token": token, "password": "brand-new-pass" })),
        )
        .await;
    assert_eq!(reset.status, StatusCode::OK);

    let reused = app
        .send(
            Method::POST,
            "/api/users/reset-password",
            None,
            Some(json!({ "token": token, "password": "another" })),
        )
        .await;
    assert_eq!(reused.status, StatusCode::BAD_REQUEST);

    let login = app
        .send(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "brand-new-pass" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn profile_update_requires_old_password_for_password_change() {
    let app = TestApp::new();
    let (_, token) = app.signed_up("Asha", "asha@example.com", "player").await;

    let renamed = app
        .send(
            Method::PUT,
            "/api/users/me",
            Some(&token),
            Some(json!({ "name": "Asha K", "profilePhoto": "https://img.example/a.png" })),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["user"]["name"], "Asha K");
    assert_eq!(
        renamed.body["user"]["profile_photo"],
        "https://img.example/a.png"
    );

    let missing_old = app
        .send(
            Method::PUT,
            "/api/users/me",
            Some(&token),
            Some(json!({ "password": "next-pass" })),
        )
        .await;
    assert_eq!(missing_old.status, StatusCode::BAD_REQUEST);

    let changed = app
        .send(
            Method::PUT,
            "/api/users/me",
            Some(&token),
            Some(json!({ "password": "next-pass", "oldPassword": PASSWORD })),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
}
