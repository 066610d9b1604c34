mod common;

use std::fs;
use std::path::Path;

use url::Url;

use bingwall_core::error::DownloadError;
use bingwall_core::model::{ImageDescriptor, Resolution};
use bingwall_core::settings::Settings;
use bingwall_infra::cache::ImageCache;

use common::{FakeTransport, Reply};

fn descriptor(url: &str) -> ImageDescriptor {
    ImageDescriptor {
        remote_url: Url::parse(url).unwrap(),
        day_offset: 0,
        market: "en-US".into(),
        requested: Resolution::new(1920, 1080),
        title: None,
        copyright: None,
        start_date: None,
    }
}

fn settings(dir: &Path) -> Settings {
    Settings::new(
        Url::parse("https://www.bing.com").unwrap(),
        dir.join("images"),
    )
}

fn leftovers(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn second_ensure_is_a_cache_hit() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(dir.path());
    let t = FakeTransport::new().on(
        "https://example.com/img/",
        Reply::Body(b"jpeg bytes".to_vec()),
    );
    let cache = ImageCache::new(&s, &t);
    let d = descriptor("https://example.com/img/ABC123.jpg");

    let first = cache.ensure(&d).unwrap();
    assert_eq!(first.local_path, s.cache_dir.join("ABC123.jpg"));
    assert_eq!(fs::read(&first.local_path).unwrap(), b"jpeg bytes");

    let second = cache.ensure(&d).unwrap();
    assert_eq!(second, first);
    assert_eq!(t.request_count(), 1);
    assert_eq!(fs::read(&second.local_path).unwrap(), b"jpeg bytes");
    assert_eq!(leftovers(&s.cache_dir), ["ABC123.jpg"]);
}

#[test]
fn existing_file_is_never_refetched() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(dir.path());
    fs::create_dir_all(&s.cache_dir).unwrap();
    fs::write(s.cache_dir.join("old.jpg"), b"previous").unwrap();

    let t = FakeTransport::new();
    let cache = ImageCache::new(&s, &t);
    let got = cache.ensure(&descriptor("https://example.com/old.jpg")).unwrap();

    assert_eq!(t.request_count(), 0);
    assert_eq!(fs::read(got.local_path).unwrap(), b"previous");
}

#[test]
fn interrupted_download_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(dir.path());
    let t = FakeTransport::new().on(
        "https://example.com/",
        Reply::Interrupted(b"half a jp".to_vec()),
    );
    let cache = ImageCache::new(&s, &t);
    let d = descriptor("https://example.com/img/ABC123.jpg");

    let err = cache.ensure(&d).unwrap_err();
    assert!(matches!(err, DownloadError::Transport(_)), "{err:?}");
    assert!(!s.cache_dir.join("ABC123.jpg").exists());
    assert!(leftovers(&s.cache_dir).is_empty());
}

#[test]
fn http_error_status_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(dir.path());
    let t = FakeTransport::new().on("https://example.com/", Reply::Status(404));
    let cache = ImageCache::new(&s, &t);

    let err = cache
        .ensure(&descriptor("https://example.com/img/gone.jpg"))
        .unwrap_err();
    assert!(matches!(err, DownloadError::Status(404)));
    assert!(!s.cache_dir.join("gone.jpg").exists());
}

#[test]
fn url_without_file_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings(dir.path());
    let t = FakeTransport::new();
    let cache = ImageCache::new(&s, &t);

    let err = cache.ensure(&descriptor("https://example.com/img/")).unwrap_err();
    assert!(matches!(err, DownloadError::InvalidFileName(_)));
    assert_eq!(t.request_count(), 0);
}

#[test]
fn non_utf8_cache_dir_is_rejected_before_download() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let mut s = settings(dir.path());
    s.cache_dir = dir.path().join(OsStr::from_bytes(b"caf\xe9"));
    let t = FakeTransport::new().on("https://example.com/", Reply::Body(b"image".to_vec()));
    let cache = ImageCache::new(&s, &t);

    let err = cache
        .ensure(&descriptor("https://example.com/img/ABC123.jpg"))
        .unwrap_err();
    assert!(matches!(err, DownloadError::NonUtf8Path(_)), "{err:?}");
    assert_eq!(t.request_count(), 0);
    assert!(!s.cache_dir.exists());
}
