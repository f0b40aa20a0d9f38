use std::collections::HashMap;

use axum::extract::{Form, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use fritzbox_client::data::LogCategory;
use fritzbox_client::{Challenge, Client, DecodeError, Error, Session, SessionId};

const CHALLENGE: &str = "1234567z";
const USERNAME: &str = "fritz3713";
const PASSWORD: &str = "äbc";
/// `{CHALLENGE}-{md5(utf16le("{CHALLENGE}-{PASSWORD}"))}`
const RESPONSE: &str = "1234567z-9e224a41eeefa284df7bb0f26c2913e2";
const SID: &str = "0de8afc227e5abeb";
const ZERO_SID: &str = "0000000000000000";
const BLOCK_TIME: u32 = 8;

const OVERVIEW: &str = r#"{
    "pid": "overview",
    "data": {
        "fritzos": {"Productname": "FRITZ!Box 7590", "nspver": "7.57", "energy": "37"},
        "internet": {
            "txt": ["Anbieter: Vodafone", "verbunden seit 05.11.2023, 08:42 Uhr"],
            "led": "globe_online",
            "title": "Internet",
            "down": "↓ 250,0 Mbit/s / 287,3 Mbit/s",
            "up": "↑ 1,0 Gbit/s / 1,1 Gbit/s",
            "link": "inetMon"
        },
        "wlan": {"txt": "an", "led": "led_green", "title": "WLAN", "link": "wSet", "tooltip": ""}
    },
    "sid": "0de8afc227e5abeb"
}"#;

const LOGS: &str = r#"{
    "pid": "log",
    "data": {
        "log": [
            ["05.11.23", "08:42:10", "Internetverbindung wurde erfolgreich hergestellt.", "24", "2", ""],
            ["05.11.23", "08:40:00", "Anmeldung an der FRITZ!Box-Benutzeroberfläche.", "501", "1", ""],
            ["05.11.23", "08:39:59", "Internetverbindung wurde getrennt.", "23", "2", ""]
        ]
    },
    "sid": "0de8afc227e5abeb"
}"#;

const DSL: &str = r#"{
    "pid": "dslOv",
    "data": {"connectionData": {"modell": "VDSL2", "lineLength": 320, "dsRate": "287,3 Mbit/s", "usRate": "46,7 Mbit/s"}},
    "sid": "0de8afc227e5abeb"
}"#;

const SUPPORT_DATA: &[u8] = b"##### BEGIN SECTION SupportData\n\xff\xfe\n";

fn stats_json() -> String {
    let series = |value: i64| format!("{:?}", [value; 19]);
    format!(
        r#"[{{"ds_bps_curr_max": 3000, "us_bps_curr_max": 800, "downstream": 31250000, "upstream": 5000000,
            "dynamic": false, "mode": "Kabel", "name": "Internet",
            "ds_bps_curr": {}, "ds_mc_bps_curr": {}, "ds_guest_bps_curr": {},
            "us_realtime_bps_curr": {}, "us_important_bps_curr": {}, "us_default_bps_curr": {},
            "us_background_bps_curr": {}, "guest_us_bps": {}}}]"#,
        series(100),
        series(20),
        series(3),
        series(1),
        series(2),
        series(3),
        series(4),
        series(5),
    )
}

fn session_info(sid: &str, block_time: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><SessionInfo><SID>{sid}</SID><Challenge>{CHALLENGE}</Challenge><BlockTime>{block_time}</BlockTime><Rights></Rights><Users><User last="1">{USERNAME}</User></Users></SessionInfo>"#
    )
}

fn has_sid(params: &HashMap<String, String>) -> bool {
    params.get("sid").map(String::as_str) == Some(SID)
}

fn has_cache_buster(params: &HashMap<String, String>) -> bool {
    params
        .iter()
        .any(|(key, value)| key.starts_with('t') && key.len() > 1 && value == "nocache")
}

/// Answer of `login_sid.lua` to a session check or a logout.
fn session_check(form: HashMap<String, String>) -> Result<String, StatusCode> {
    match form.get("logout").map(String::as_str) {
        None if has_sid(&form) => Ok(session_info(SID, 0)),
        None => Ok(session_info(ZERO_SID, 0)),
        Some("1") if has_sid(&form) => Ok(session_info(ZERO_SID, 0)),
        Some(_) => Err(StatusCode::BAD_REQUEST),
    }
}

/// Accepts any login and answers every `data.lua` page with `body`.
fn data_box(body: &'static str) -> Router {
    Router::new()
        .route("/login_sid.lua", get(|| async { session_info(SID, 0) }))
        .route(
            "/data.lua",
            post(move |Form(form): Form<HashMap<String, String>>| async move {
                if has_sid(&form) {
                    Ok(body)
                } else {
                    Err(StatusCode::FORBIDDEN)
                }
            }),
        )
}

/// Behaves like a FRITZ!Box for the given answers of `inetstat_monitor.lua`.
fn fake_box(stats: String, disconnect: &'static str) -> Router {
    Router::new()
        .route(
            "/login_sid.lua",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("response") {
                    None => session_info(ZERO_SID, 0),
                    Some(response)
                        if response == RESPONSE
                            && params.get("username").map(String::as_str) == Some(USERNAME) =>
                    {
                        session_info(SID, 0)
                    }
                    Some(_) => session_info(ZERO_SID, BLOCK_TIME),
                }
            })
            .post(|Form(form): Form<HashMap<String, String>>| async move {
                session_check(form)
            }),
        )
        .route(
            "/data.lua",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let overview = params.get("page").map(String::as_str) == Some("overview")
                    && params.get("xhr").map(String::as_str) == Some("1")
                    && params.get("lang").map(String::as_str) == Some("de");
                if !has_sid(&params) {
                    Err(StatusCode::FORBIDDEN)
                } else if overview {
                    Ok(OVERVIEW)
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            })
            .post(|Form(form): Form<HashMap<String, String>>| async move {
                if !has_sid(&form) {
                    return Err(StatusCode::FORBIDDEN);
                }
                match form.get("page").map(String::as_str) {
                    Some("log") => Ok(LOGS),
                    Some("dslOv") => Ok(DSL),
                    _ => Err(StatusCode::NOT_FOUND),
                }
            }),
        )
        .route(
            "/internet/inetstat_monitor.lua",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                if !has_sid(&params) || !has_cache_buster(&params) {
                    return Err(StatusCode::BAD_REQUEST);
                }
                match params.get("action").map(String::as_str) {
                    Some("get_graphic") => Ok(stats),
                    Some("disconnect") => Ok(disconnect.to_string()),
                    _ => Err(StatusCode::NOT_FOUND),
                }
            }),
        )
        .route(
            "/cgi-bin/firmwarecfg",
            post(|body: String| async move {
                if body.contains("name=\"SupportData\"") && body.contains(SID) {
                    Ok(SUPPORT_DATA.to_vec())
                } else {
                    Err(StatusCode::BAD_REQUEST)
                }
            }),
        )
}

/// Serve `router` on a random local port, returns the endpoint.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn setup() -> (Client, Session) {
    setup_with(stats_json(), "done:0").await
}

async fn setup_with(stats: String, disconnect: &'static str) -> (Client, Session) {
    let endpoint = serve(fake_box(stats, disconnect)).await;
    let client = Client::new(endpoint).unwrap();
    let session = client.login(USERNAME, PASSWORD).await.unwrap();
    (client, session)
}

#[tokio::test]
async fn login() {
    let endpoint = serve(fake_box(stats_json(), "done:0")).await;
    let client = Client::new(format!("{endpoint}/")).unwrap();

    let session = client.login(USERNAME, PASSWORD).await.unwrap();

    assert_eq!(session.session_id().to_string(), SID);
    assert_eq!(session.challenge().as_str(), CHALLENGE);
    assert_eq!(session.endpoint(), endpoint);
    assert_eq!(session.block_time(), 0);
    assert_eq!(session.language(), "de");
}

#[tokio::test]
async fn login_wrong_password() {
    let endpoint = serve(fake_box(stats_json(), "done:0")).await;
    let client = Client::new(endpoint).unwrap();

    let err = client.login(USERNAME, "wrong").await.unwrap_err();
    assert!(
        matches!(err, Error::AuthenticationFailed { block_time } if block_time == BLOCK_TIME),
        "{err:?}"
    );
}

#[tokio::test]
async fn login_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(format!("http://{addr}")).unwrap();
    let err = client.login(USERNAME, PASSWORD).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn login_not_xml() {
    let endpoint = serve(Router::new().route("/login_sid.lua", get(|| async { "<html>" }))).await;
    let client = Client::new(endpoint).unwrap();

    let err = client.login(USERNAME, PASSWORD).await.unwrap_err();
    assert!(
        matches!(err, Error::Decode(DecodeError::SessionInfo(_))),
        "{err:?}"
    );
}

#[tokio::test]
async fn status() {
    let (client, session) = setup().await;

    let status = client.status(&session).await.unwrap();

    assert_eq!(status.fritzos.as_ref().unwrap().product_name, "FRITZ!Box 7590");
    let internet = status.internet.as_ref().unwrap();
    assert!(internet.online);
    assert_eq!(internet.provider, "Vodafone");
    assert_eq!(internet.download, 25_000_000);
    assert_eq!(internet.upload, 100_000_000);
    assert_eq!(
        internet.connection_time.unwrap().to_string(),
        "2023-11-05 08:42:00"
    );
    assert_eq!(status.wlan.as_ref().unwrap().info().unwrap().txt, "an");
}

#[tokio::test]
async fn status_with_invalid_session() {
    let (client, session) = setup().await;
    let other = Session::new(
        "00000000deadbeef".parse::<SessionId>().unwrap(),
        Challenge::new(CHALLENGE),
        session.endpoint(),
        0,
        "de",
    );

    let err = client.status(&other).await.unwrap_err();
    match err {
        Error::Transport(err) => assert_eq!(err.status().map(|s| s.as_u16()), Some(403)),
        err => panic!("unexpected error {err:?}"),
    }
}

#[tokio::test]
async fn traffic_stats() {
    let (client, session) = setup().await;

    let stats = client.traffic_stats(&session).await.unwrap();

    assert_eq!(stats.downstream_capacity, 31_250_000);
    assert_eq!(stats.mode, "Kabel");
    assert_eq!(stats.downstream_total, [123; 19]);
    assert_eq!(stats.upstream_total, [15; 19]);
}

#[tokio::test]
async fn traffic_stats_empty() {
    let (client, session) = setup_with("[]".to_string(), "done:0").await;

    let err = client.traffic_stats(&session).await.unwrap_err();
    assert!(
        matches!(err, Error::Decode(DecodeError::EmptyStats)),
        "{err:?}"
    );
}

#[tokio::test]
async fn traffic_stats_not_json() {
    let (client, session) = setup_with("Fehler".to_string(), "done:0").await;

    let err = client.traffic_stats(&session).await.unwrap_err();
    assert!(matches!(err, Error::Decode(DecodeError::Json(_))), "{err:?}");
}

#[tokio::test]
async fn logs() {
    let (client, session) = setup().await;

    let logs = client.logs(&session).await.unwrap();

    assert_eq!(logs.len(), 3);
    assert_eq!(logs.filter(0), logs);
    assert_eq!(logs.filter(2).len(), 2);
    assert_eq!(logs.filter_category(LogCategory::System).len(), 1);
    assert!(logs.filter(6).is_empty());
}

#[tokio::test]
async fn dsl_info() {
    let (client, session) = setup().await;

    let dsl = client.dsl_info(&session).await.unwrap();

    assert_eq!(dsl.model, "VDSL2");
    assert_eq!(dsl.line_length, 320);
    assert_eq!(dsl.upstream_rate, "46,7 Mbit/s");
}

#[tokio::test]
async fn support_data() {
    let (client, session) = setup().await;

    let data = client.support_data(&session).await.unwrap();
    assert_eq!(data, SUPPORT_DATA);
}

#[tokio::test]
async fn disconnect() {
    let (client, session) = setup().await;
    client.disconnect(&session).await.unwrap();
}

#[tokio::test]
async fn disconnect_failed() {
    for body in ["done:1", "", "done:0\n"] {
        let (client, session) = setup_with(stats_json(), body).await;

        let err = client.disconnect(&session).await.unwrap_err();
        match err {
            Error::CommandFailed { command, body: got } => {
                assert_eq!(command, "disconnect");
                assert_eq!(got, body);
            }
            err => panic!("unexpected error {err:?}"),
        }
    }
}

#[tokio::test]
async fn session_valid_and_logout() {
    let (client, session) = setup().await;

    assert!(client.session_valid(&session).await.unwrap());

    let other = Session::new(
        SessionId::INVALID,
        Challenge::new(CHALLENGE),
        session.endpoint(),
        0,
        "de",
    );
    assert!(!client.session_valid(&other).await.unwrap());

    client.logout(session).await.unwrap();
}

#[tokio::test]
async fn logout_sends_logout_field() {
    // only `logout=1` together with the sid is accepted
    let router = Router::new().route(
        "/login_sid.lua",
        get(|| async { session_info(SID, 0) }).post(
            |Form(form): Form<HashMap<String, String>>| async move {
                match form.get("logout").map(String::as_str) {
                    Some("1") if has_sid(&form) => Ok(session_info(ZERO_SID, 0)),
                    _ => Err(StatusCode::BAD_REQUEST),
                }
            },
        ),
    );
    let client = Client::new(serve(router).await).unwrap();
    let session = client.login(USERNAME, PASSWORD).await.unwrap();

    let err = client.session_valid(&session).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");

    client.logout(session).await.unwrap();
}

#[tokio::test]
async fn logs_missing_field() {
    let client = Client::new(serve(data_box(r#"{"data": {}}"#)).await).unwrap();
    let session = client.login(USERNAME, PASSWORD).await.unwrap();

    let err = client.logs(&session).await.unwrap_err();
    assert!(
        matches!(err, Error::Decode(DecodeError::MissingField("log"))),
        "{err:?}"
    );
}

#[tokio::test]
async fn dsl_info_missing_field() {
    let client = Client::new(serve(data_box(r#"{"pid": "dslOv", "data": {}}"#)).await).unwrap();
    let session = client.login(USERNAME, PASSWORD).await.unwrap();

    let err = client.dsl_info(&session).await.unwrap_err();
    assert!(
        matches!(err, Error::Decode(DecodeError::MissingField("connectionData"))),
        "{err:?}"
    );
}
