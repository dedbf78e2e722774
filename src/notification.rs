pub fn send(body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname("Stickerboard")
        .summary("Stickerboard")
        .body(&body)
        .icon("image-x-generic")
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}
