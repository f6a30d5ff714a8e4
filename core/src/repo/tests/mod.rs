use std::collections::BTreeMap;

use super::Repository;
use crate::memory::{MemoryState, MemoryStore, MemoryWorkTree};
use crate::object::{Commit, Id, Object};
use crate::work_tree::WorkTree;


type TestRepo = Repository<MemoryStore, MemoryWorkTree, MemoryState>;

fn new_repo() -> TestRepo {
    Repository::init(MemoryStore::new(), MemoryWorkTree::new(), MemoryState::new()).unwrap()
}

// Round-trip through the state store, as a fresh process would.
fn reopen(r: TestRepo) -> TestRepo {
    let (store, work_tree, state) = r.into_parts();
    Repository::open(store, work_tree, state).unwrap()
}

fn write(r: &mut TestRepo, path: &str, content: &str) {
    r.work_tree_mut().write(path, content.as_bytes()).unwrap();
}

fn delete(r: &mut TestRepo, path: &str) {
    r.work_tree_mut().delete(path).unwrap();
}

fn read(r: &TestRepo, path: &str) -> Option<String> {
    r.work_tree()
        .read(path)
        .unwrap()
        .map(|content| String::from_utf8(content).unwrap())
}

/// All files in the working tree with their contents.
fn tree(r: &TestRepo) -> BTreeMap<String, Vec<u8>> {
    let wt = r.work_tree();
    wt.files()
        .unwrap()
        .into_iter()
        .map(|path| {
            let content = wt.read(&path).unwrap().unwrap();
            (path, content)
        })
        .collect()
}

fn commit_file(r: &mut TestRepo, path: &str, content: &str, message: &str) -> Id {
    write(r, path, content);
    r.add(path).unwrap();
    r.commit(message).unwrap()
}

fn blob_id(content: &str) -> Id {
    Object::blob(content.as_bytes().to_vec()).id()
}

fn branch_head(r: &TestRepo, name: &str) -> Id {
    *r.state().branches.get(name).unwrap()
}

fn paths(commit: &Commit) -> Vec<&str> {
    commit.snapshot().keys().map(|p| p.as_str()).collect()
}
