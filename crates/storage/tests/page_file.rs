use pagecache_error::Error;
use pagecache_storage::{
    BufferPool, BufferPoolConfig, DiskManager, PageStore, ReplacementStrategy, PAGE_SIZE,
};
use tempfile::TempDir;

fn create_page_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("pages.db");
    drop(DiskManager::create(&path).unwrap());
    path
}

#[test]
fn test_pages_survive_pool_restarts() {
    let dir = TempDir::new().unwrap();
    let path = create_page_file(&dir);

    for strategy in ReplacementStrategy::ALL {
        let mut bpm = BufferPool::open(&path, BufferPoolConfig::new(3, strategy)).unwrap();
        for page_id in 0..8u32 {
            bpm.pin(page_id).unwrap();
            let data = bpm.page_mut(page_id).unwrap();
            data[0] = data[0].wrapping_add(1);
            data[PAGE_SIZE - 1] = page_id as u8;
            bpm.mark_dirty(page_id).unwrap();
            bpm.unpin(page_id).unwrap();
        }
        bpm.shutdown().unwrap();
    }

    let mut dm = DiskManager::open(&path).unwrap();
    assert_eq!(dm.page_count(), 8);
    for page_id in 0..8u32 {
        let block = dm.read_block(page_id).unwrap();
        assert_eq!(block[0], ReplacementStrategy::ALL.len() as u8);
        assert_eq!(block[PAGE_SIZE - 1], page_id as u8);
    }
}

#[test]
fn test_page_file_is_locked_while_open() {
    let dir = TempDir::new().unwrap();
    let path = create_page_file(&dir);

    let bpm = BufferPool::open(&path, BufferPoolConfig::default()).unwrap();
    assert!(matches!(
        BufferPool::open(&path, BufferPoolConfig::default()),
        Err(Error::IO(_))
    ));
    drop(bpm);

    BufferPool::open(&path, BufferPoolConfig::default()).unwrap();
}

#[test]
fn test_config_from_json() {
    let dir = TempDir::new().unwrap();
    let path = create_page_file(&dir);

    let config =
        BufferPoolConfig::from_json(r#"{"capacity": 2, "strategy": "CLOCK"}"#).unwrap();
    let mut bpm = BufferPool::open(&path, config).unwrap();
    assert_eq!(bpm.strategy(), ReplacementStrategy::Clock);

    for page_id in [1, 2, 3] {
        bpm.pin(page_id).unwrap();
        bpm.unpin(page_id).unwrap();
    }
    assert_eq!(bpm.frame_contents(), vec![3, 2]);
    assert_eq!(bpm.num_read_io(), 3);
    assert_eq!(bpm.num_write_io(), 0);
}
