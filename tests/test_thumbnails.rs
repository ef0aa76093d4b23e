use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use recipe_finder::{ImageConfig, ImageLoadError, RecipeRecord, Thumbnail, ThumbnailLoader};
use std::io::Cursor;

fn png_bytes(size: u32, color: Rgba<u8>) -> Vec<u8> {
    // Per-pixel noise keeps large images expensive to decode
    let image = RgbaImage::from_fn(size, size, |x, y| {
        let jitter = ((x * 7 + y * 13) % 5) as u8;
        Rgba([
            color[0].saturating_sub(jitter),
            color[1].saturating_sub(jitter),
            color[2].saturating_sub(jitter),
            255,
        ])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn record(title: &str, image_url: Option<String>) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        image_url,
        servings: None,
        ready_in_minutes: None,
        source_url: format!("https://example.com/{}", title),
    }
}

/// Index of the strongest colour channel at the thumbnail centre
fn dominant_channel(thumbnail: &Thumbnail) -> usize {
    let pixel = thumbnail.as_rgba().get_pixel(thumbnail.width() / 2, thumbnail.height() / 2);
    (0..3).max_by_key(|&i| pixel[i]).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_load_all_returns_thumbnails_in_record_order() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    // The first image is by far the slowest to transfer and decode
    let images = [
        ("/img/red.png", png_bytes(1000, Rgba([250, 10, 10, 255]))),
        ("/img/green.png", png_bytes(16, Rgba([10, 250, 10, 255]))),
        ("/img/blue.png", png_bytes(8, Rgba([10, 10, 250, 255]))),
    ];
    let mut mocks = Vec::new();
    for (path, bytes) in &images {
        mocks.push(
            server
                .mock("GET", *path)
                .with_status(200)
                .with_header("content-type", "image/png")
                .with_body(bytes)
                .create_async()
                .await,
        );
    }

    let records = vec![
        record("red", Some(format!("{}/img/red.png", base))),
        record("none", None),
        record("green", Some(format!("{}/img/green.png", base))),
        record("blue", Some(format!("{}/img/blue.png", base))),
    ];

    let config = ImageConfig {
        concurrency: 4,
        thumbnail_size: 32,
    };
    let loader = ThumbnailLoader::new(&config, None).unwrap();
    let thumbnails = loader.load_all(&records).await;

    assert_eq!(thumbnails.len(), records.len());
    assert_eq!(dominant_channel(thumbnails[0].as_ref().unwrap()), 0);
    assert!(matches!(thumbnails[1], Err(ImageLoadError::MissingUrl)));
    assert_eq!(dominant_channel(thumbnails[2].as_ref().unwrap()), 1);
    assert_eq!(dominant_channel(thumbnails[3].as_ref().unwrap()), 2);

    let first = thumbnails[0].as_ref().unwrap();
    assert_eq!((first.width(), first.height()), (32, 32));
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_load_all_with_single_slot_keeps_order() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let _broken = server
        .mock("GET", "/img/broken.png")
        .with_status(500)
        .create_async()
        .await;
    let _ok = server
        .mock("GET", "/img/ok.png")
        .with_status(200)
        .with_body(png_bytes(10, Rgba([10, 250, 10, 255])))
        .create_async()
        .await;

    let records = vec![
        record("broken", Some(format!("{}/img/broken.png", base))),
        record("ok", Some(format!("{}/img/ok.png", base))),
    ];

    let config = ImageConfig {
        concurrency: 1,
        thumbnail_size: 150,
    };
    let thumbnails = ThumbnailLoader::new(&config, None)
        .unwrap()
        .load_all(&records)
        .await;

    assert!(matches!(thumbnails[0], Err(ImageLoadError::Status(500))));
    let ok = thumbnails[1].as_ref().unwrap();
    assert_eq!((ok.width(), ok.height()), (150, 150));
}
