//! Concurrent, order-preserving batch loading.
//!
//! Every load is issued up front and awaited together. The result vector is
//! indexed like the request list no matter which load settles first, so the
//! Nth requested photo always lands in the Nth placement.

use std::future::Future;

use futures_util::future::try_join_all;
use tracing::debug;

use super::{DecodeError, DecodedImage};

/// Load every source concurrently and wait for all of them.
///
/// `load` turns one source (a URL, a byte buffer, a pending promise...) into a
/// decoded image. The first failure aborts the whole batch.
pub async fn load_all<S, I, F, Fut>(sources: I, load: F) -> Result<Vec<DecodedImage>, DecodeError>
where
    I: IntoIterator<Item = S>,
    F: FnMut(S) -> Fut,
    Fut: Future<Output = Result<DecodedImage, DecodeError>>,
{
    let pending: Vec<Fut> = sources.into_iter().map(load).collect();
    let requested = pending.len();
    debug!(requested, "loading image batch");

    let images = try_join_all(pending).await?;
    debug!(loaded = images.len(), "image batch loaded");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    fn tagged(tag: u8) -> DecodedImage {
        DecodedImage::filled(1, 1, [tag, tag, tag, 255])
    }

    #[test]
    fn test_results_follow_request_order() {
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..4)
            .map(|_| oneshot::channel::<DecodedImage>())
            .unzip();

        let loads = load_all(receivers, |rx: oneshot::Receiver<DecodedImage>| async move {
            rx.await.map_err(|e| DecodeError::LoadFailed(e.to_string()))
        });

        // Complete in reverse order of request
        let complete = async move {
            for (i, tx) in senders.into_iter().enumerate().rev() {
                let _ = tx.send(tagged(i as u8 * 10));
            }
        };

        let (images, ()) = block_on(futures::future::join(loads, complete));
        let tags: Vec<u8> = images.unwrap().iter().map(|img| img.pixels[0]).collect();
        assert_eq!(tags, vec![0, 10, 20, 30]);
    }

    #[test]
    fn test_any_failure_fails_batch() {
        let result = block_on(load_all(0..5, |i| async move {
            if i == 3 {
                Err(DecodeError::LoadFailed(format!("source {i}")))
            } else {
                Ok(tagged(i))
            }
        }));

        match result {
            Err(DecodeError::LoadFailed(msg)) => assert_eq!(msg, "source 3"),
            other => panic!("expected load failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch() {
        let images = block_on(load_all(Vec::<u8>::new(), |i| async move { Ok(tagged(i)) }));
        assert!(images.unwrap().is_empty());
    }

    #[test]
    fn test_decodes_byte_sources() {
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::RgbaImage::from_pixel(5, 3, image::Rgba([1, 2, 3, 255]))
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        let bytes = bytes.into_inner();

        let images = block_on(load_all(vec![bytes.clone(), bytes], |b| async move {
            crate::decode::decode_image(&b)
        }))
        .unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!((images[1].width, images[1].height), (5, 3));
    }
}
