use bookshelf_core::{LinkError, LinkKind, LinkManager, LinkStrategy};
use std::fs;
use std::path::Path;

#[cfg(unix)]
#[test]
fn symlink_points_at_absolute_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "library/dune.epub", b"spice");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Symlink);
    let container = links.ensure_container("scifi").unwrap();

    let created = links.create_link(&source, &container, |_| false).unwrap();

    assert_eq!(created.link_name, "dune.epub");
    assert_eq!(created.kind, LinkKind::Symlink);
    assert_eq!(created.size_bytes, 5);
    assert!(created.source_path.is_absolute());
    assert_eq!(fs::read_link(&created.path).unwrap(), created.source_path);
    assert_eq!(fs::read(&created.path).unwrap(), b"spice");
}

#[test]
fn colliding_names_get_increasing_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(dir.path(), "a/dune.epub", b"one");
    let second = write_file(dir.path(), "b/dune.epub", b"two");
    let third = write_file(dir.path(), "c/dune.epub", b"three");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);
    let container = links.ensure_container("scifi").unwrap();

    let names: Vec<String> = [first, second, third]
        .iter()
        .map(|source| links.create_link(source, &container, |_| false).unwrap().link_name)
        .collect();

    assert_eq!(names, vec!["dune.epub", "dune_1.epub", "dune_2.epub"]);
}

#[test]
fn reserved_names_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);
    let container = links.ensure_container("scifi").unwrap();

    let created = links
        .create_link(&source, &container, |name| name == "dune.epub")
        .unwrap();

    assert_eq!(created.link_name, "dune_1.epub");
}

#[cfg(unix)]
#[test]
fn dangling_symlink_still_occupies_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Symlink);
    let container = links.ensure_container("scifi").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.epub"), container.join("dune.epub")).unwrap();

    let created = links.create_link(&source, &container, |_| false).unwrap();

    assert_eq!(created.link_name, "dune_1.epub");
}

#[test]
fn missing_or_directory_source_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);
    let container = links.ensure_container("scifi").unwrap();

    let missing = links
        .create_link(&dir.path().join("nope.epub"), &container, |_| false)
        .unwrap_err();
    assert!(matches!(missing, LinkError::InvalidSource { .. }));

    let directory = links
        .create_link(dir.path(), &container, |_| false)
        .unwrap_err();
    assert!(matches!(directory, LinkError::InvalidSource { .. }));

    assert!(links.scan_container("scifi").unwrap().is_empty());
}

#[test]
fn copy_strategy_duplicates_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice must flow");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);
    let container = links.ensure_container("scifi").unwrap();

    let created = links.create_link(&source, &container, |_| false).unwrap();

    assert_eq!(created.kind, LinkKind::Copy);
    assert!(!created.path.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(fs::read(&created.path).unwrap(), b"spice must flow");
}

#[test]
fn missing_container_makes_creation_fail() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);

    let err = links
        .create_link(&source, &links.container_dir("never-created"), |_| false)
        .unwrap_err();

    assert!(matches!(err, LinkError::CreationFailed { .. }));
}

#[cfg(unix)]
#[test]
fn symlink_failure_is_reported_without_falling_back_to_copy() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Symlink);
    let container = links.container_dir("never-created");

    let err = links.create_link(&source, &container, |_| false).unwrap_err();

    assert!(matches!(err, LinkError::CreationFailed { .. }));
    assert!(!container.exists());
    assert_eq!(links.strategy(), LinkStrategy::Symlink);
}

#[test]
fn remove_link_is_idempotent_and_keeps_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::probe(dir.path().join("books"));
    let container = links.ensure_container("scifi").unwrap();
    let created = links.create_link(&source, &container, |_| false).unwrap();

    assert!(links.remove_link(&container, &created.link_name).unwrap());
    assert!(!links.remove_link(&container, &created.link_name).unwrap());
    assert!(!links.remove_link(&container, "../../dune.epub").unwrap());
    assert!(source.exists());
}

#[test]
fn remove_container_deletes_links_but_not_sources() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "dune.epub", b"spice");
    let links = LinkManager::probe(dir.path().join("books"));
    let container = links.ensure_container("scifi").unwrap();
    links.create_link(&source, &container, |_| false).unwrap();

    links.remove_container("scifi").unwrap();
    links.remove_container("scifi").unwrap();

    assert!(!container.exists());
    assert!(source.exists());
}

#[test]
fn container_operations_refuse_names_outside_books_dir() {
    let dir = tempfile::tempdir().unwrap();
    let books = dir.path().join("books");
    let links = LinkManager::new(&books, LinkStrategy::Copy);
    links.ensure_container("scifi").unwrap();

    for name in ["..", ".", "a/b", ""] {
        assert!(matches!(
            links.remove_container(name),
            Err(LinkError::InvalidContainerName(_))
        ));
        assert!(matches!(
            links.ensure_container(name),
            Err(LinkError::InvalidContainerName(_))
        ));
        assert!(matches!(
            links.scan_container(name),
            Err(LinkError::InvalidContainerName(_))
        ));
    }
    assert!(books.join("scifi").is_dir());
}

#[test]
fn scan_container_lists_sorted_names() {
    let dir = tempfile::tempdir().unwrap();
    let links = LinkManager::new(dir.path().join("books"), LinkStrategy::Copy);
    let container = links.ensure_container("scifi").unwrap();
    for name in ["solaris.pdf", "dune.epub"] {
        let source = write_file(dir.path(), name, b"x");
        links.create_link(&source, &container, |_| false).unwrap();
    }

    assert_eq!(
        links.scan_container("scifi").unwrap(),
        vec!["dune.epub", "solaris.pdf"]
    );
    assert!(links.scan_container("absent").unwrap().is_empty());
}

fn write_file(root: &Path, relative: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();
    path
}
