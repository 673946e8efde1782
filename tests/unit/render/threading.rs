use super::*;

#[test]
fn zero_threads_is_a_configuration_error() {
    let threading = RenderThreading {
        threads: Some(0),
        ..RenderThreading::parallel()
    };
    assert!(matches!(
        threading.build_pool(),
        Err(FormwaveError::Configuration(_))
    ));
}

#[test]
fn explicit_thread_count_is_honoured() {
    let threading = RenderThreading {
        threads: Some(2),
        ..RenderThreading::parallel()
    };
    let pool = threading.build_pool().unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}

#[test]
fn chunk_size_never_drops_below_one() {
    let threading = RenderThreading {
        chunk_size: 0,
        ..RenderThreading::default()
    };
    assert_eq!(threading.normalized_chunk_size(), 1);
}
