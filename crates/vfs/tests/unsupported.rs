mod common;

use std::sync::Arc;

use common::MockNode;
use vfs::{FsError, Vfs, VfsNode};

fn setup() -> (Vfs, Arc<MockNode>) {
    let node = Arc::new(MockNode::new().with_file("f", b"data").with_dir("d", &[]));
    let vfs = Vfs::with_nodes([("/", node.clone() as Arc<dyn VfsNode>)]).unwrap();
    (vfs, node)
}

const PATHS: &[&str] = &["", "/", "f", "/f", "d", "../..", "//x//", "/no/such"];

#[test]
fn test_mutations_not_supported_for_any_path() {
    let (vfs, node) = setup();
    let session = vfs.open_fs();

    for path in PATHS {
        assert_eq!(session.mkdir(path, 0o755), Err(FsError::NotSupported));
        assert_eq!(session.rmdir(path), Err(FsError::NotSupported));
        assert_eq!(session.remove(path), Err(FsError::NotSupported));
        for to in PATHS {
            assert_eq!(session.rename(path, to), Err(FsError::NotSupported));
        }
    }

    assert!(node.calls().is_empty());
}

#[test]
fn test_write_not_supported_on_open_file() {
    let (vfs, node) = setup();
    let session = vfs.open_fs();
    let mut file = session.open("/f", "r").unwrap();

    assert_eq!(file.write(b"abc", 1, 3), Err(FsError::NotSupported));
    assert_eq!(file.write(b"", 0, 0), Err(FsError::NotSupported));

    // write 不会影响后续读取
    let mut buf = [0u8; 4];
    assert_eq!(file.read(&mut buf, 1, 4).unwrap(), 4);
    assert_eq!(&buf, b"data");
    file.close().unwrap();

    assert_eq!(node.calls(), vec![("open", "f".to_string())]);
}

#[test]
fn test_not_supported_errno() {
    assert_eq!(FsError::NotSupported.to_errno(), -38);
    assert_eq!(FsError::OutOfMemory.to_errno(), -12);
    assert_eq!(FsError::NotFound.to_errno(), -2);
    assert_eq!(FsError::Provider(77).to_errno(), -77);
    assert_eq!(FsError::Provider(-5).to_errno(), -5);
}

#[test]
fn test_mutations_do_not_touch_cwd() {
    let (vfs, _node) = setup();
    let session = vfs.open_fs();
    session.change_dir("/d").unwrap();

    let _ = session.mkdir("sub", 0o755);
    let _ = session.rename("/d", "/e");
    let _ = session.rmdir("/d");
    let _ = session.remove("/d");

    assert_eq!(session.current_dir().unwrap(), "/d");
}
