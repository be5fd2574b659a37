use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn publishes_visible_settings_by_key() {
    let app = TestApp::spawn().await;
    let catalog = app.seed_catalog().await;
    app.seed_setting("support_phone", Some("+31 20 123 4567"), None, false)
        .await;
    app.seed_setting("internal_note", Some("do not show"), None, true)
        .await;
    app.seed_setting("default_glass", Some("ignored"), Some(("door_glass", catalog.glass_id)), false)
        .await;
    app.seed_setting("default_size", None, Some(("door_size", catalog.size_id)), false)
        .await;
    app.seed_setting("gone", Some("x"), Some(("door_lock", 99_999)), false)
        .await;
    app.seed_setting("empty", None, None, false).await;

    let res = app.get_without_token(routes::SETTINGS).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(
        res.body,
        json!({
            "support_phone": "+31 20 123 4567",
            "default_glass": {"id": catalog.glass_id, "name": "Frosted", "active": true},
            "default_size": {
                "id": catalog.size_id,
                "door_color_id": catalog.color_id,
                "name": "Standard",
                "width": 930,
                "height": 2115,
                "active": true,
            },
            "gone": null,
            "empty": null,
        })
    );
}
