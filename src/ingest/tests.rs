use super::*;
use crate::error::IngestError;
use crate::library::SourceHandle;
use std::path::PathBuf;

struct FakeFile {
    name: String,
    readable: bool,
}

fn ok(name: &str) -> FakeFile {
    FakeFile {
        name: name.to_string(),
        readable: true,
    }
}

fn broken(name: &str) -> FakeFile {
    FakeFile {
        name: name.to_string(),
        readable: false,
    }
}

impl FileSource for FakeFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<SourceHandle, IngestError> {
        if self.readable {
            Ok(SourceHandle::new(format!("/music/{}", self.name)))
        } else {
            Err(IngestError::NotAFile(PathBuf::from(&self.name)))
        }
    }
}

fn mp3_only() -> Vec<String> {
    vec!["mp3".to_string()]
}

/// Run a whole selection to completion, recording every event.
fn ingest_all(
    files: Vec<FakeFile>,
    extensions: &[String],
    batch_size: usize,
    library: &mut Library,
    mut on_event: impl FnMut(IngestEvent),
) -> usize {
    let mut job = IngestJob::new(files, extensions, batch_size);
    loop {
        let event = job.step(library);
        on_event(event);
        match event {
            IngestEvent::Progress(_) => continue,
            IngestEvent::NoMatchingFiles => return 0,
            IngestEvent::Finished(p) => return p.processed,
        }
    }
}

#[test]
fn twenty_of_twenty_five_are_ingested_in_order() {
    let mut files = Vec::new();
    for i in 0..25 {
        if i % 5 == 4 {
            files.push(ok(&format!("notes-{i:02}.txt")));
        } else {
            files.push(ok(&format!("song-{i:02}.mp3")));
        }
    }

    let mut library = Library::new();
    let mut events = Vec::new();
    let added = ingest_all(files, &mp3_only(), 10, &mut library, |e| events.push(e));

    assert_eq!(added, 20);
    assert_eq!(library.len(), 20);
    let names: Vec<&str> = library.tracks().iter().map(|t| t.name.as_str()).collect();
    let expected: Vec<String> = (0..25)
        .filter(|i| i % 5 != 4)
        .map(|i| format!("song-{i:02}"))
        .collect();
    assert_eq!(names, expected);

    assert_eq!(
        events,
        vec![
            IngestEvent::Progress(IngestProgress { processed: 10, total: 20 }),
            IngestEvent::Finished(IngestProgress { processed: 20, total: 20 }),
        ]
    );
}

#[test]
fn no_matching_files_leaves_library_untouched() {
    let mut library = Library::new();
    let mut job = IngestJob::new(vec![ok("a.txt"), ok("b.jpg")], &mp3_only(), 10);
    assert!(!job.has_matches());
    assert_eq!(job.step(&mut library), IngestEvent::NoMatchingFiles);
    assert!(library.is_empty());
}

#[test]
fn unreadable_files_are_skipped_and_not_counted() {
    let mut library = Library::new();
    let mut job = IngestJob::new(
        vec![ok("a.mp3"), broken("b.mp3"), ok("c.MP3")],
        &mp3_only(),
        10,
    );
    assert_eq!(job.total(), 3);

    let event = job.step(&mut library);
    assert_eq!(
        event,
        IngestEvent::Finished(IngestProgress { processed: 2, total: 3 })
    );
    assert_eq!(job.failed(), 1);
    let names: Vec<&str> = library.tracks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(library.get(1).unwrap().filename, "c.MP3");
}

#[test]
fn step_processes_exactly_one_chunk() {
    let files: Vec<FakeFile> = (0..7).map(|i| ok(&format!("{i}.mp3"))).collect();
    let mut library = Library::new();
    let mut job = IngestJob::new(files, &mp3_only(), 3);

    assert!(matches!(job.step(&mut library), IngestEvent::Progress(p) if p.processed == 3));
    assert_eq!(library.len(), 3);
    assert!(matches!(job.step(&mut library), IngestEvent::Progress(p) if p.processed == 6));
    assert!(matches!(job.step(&mut library), IngestEvent::Finished(p) if p.processed == 7));
    assert!(job.is_finished());
}

#[test]
fn extend_queues_behind_pending_files() {
    let mut library = Library::new();
    let mut job = IngestJob::new(vec![ok("a.mp3"), ok("b.mp3")], &mp3_only(), 1);
    job.step(&mut library);
    job.extend(vec![ok("c.mp3"), ok("skip.wav")]);
    assert_eq!(job.total(), 3);
    while !job.is_finished() {
        job.step(&mut library);
    }
    let names: Vec<&str> = library.tracks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn percent_rounds() {
    assert_eq!(IngestProgress { processed: 1, total: 3 }.percent(), 33);
    assert_eq!(IngestProgress { processed: 2, total: 3 }.percent(), 67);
    assert_eq!(IngestProgress { processed: 0, total: 0 }.percent(), 0);
}
