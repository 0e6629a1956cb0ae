use chunked_fizzbuzz::reference::Reference;
use clap::Parser;
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use derive_deref::{Deref, DerefMut};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

const KIB: usize = 1024;
const MIB: usize = KIB * 1024;
const GIB: usize = MIB * 1024;

const BUFFER_SIZE: usize = 64 * KIB;

/// Runs FizzBuzz programs and checks their output against the reference
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command lines to run, e.g. "target/release/fizzbuzz 6000"
    #[arg(required = true)]
    submissions: Vec<String>,
    /// Stop after verifying this many GiB
    #[arg(long)]
    limit: Option<f64>,
}

fn seek_to_fizz_start<T: Read>(reader: &mut T) -> Result<(), std::io::Error> {
    let mut buffer = [0; 1];
    let mut state = 0;
    let mut skipped = 0;

    while skipped < 300 * KIB {
        reader.read_exact(&mut buffer)?;
        skipped += 1;

        state = match state {
            0 if buffer[0] == b'\n' => 1,
            1 if buffer[0] == b'1' => 2,
            2 if buffer[0] == b'\n' => return Ok(()),
            _ if buffer[0] == b'\n' => 1,
            _ => 0,
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        "FizzBuzz start (newline followed by the number 1 followed by another newline) not found after 300 KiB of output",
    ))
}

#[derive(Deref, DerefMut)]
struct DroppableChild(Child);

impl Drop for DroppableChild {
    fn drop(&mut self) {
        // The child may already have exited.
        let _ = self.0.kill();
    }
}

impl From<Child> for DroppableChild {
    fn from(child: Child) -> Self {
        DroppableChild(child)
    }
}

fn spawn(submission: &str) -> Result<DroppableChild> {
    let mut words = submission.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| eyre!("empty submission command"))?;

    let child = Command::new(program)
        .args(words)
        .stdout(Stdio::piped())
        .spawn()
        .wrap_err_with(|| format!("failed to spawn `{submission}`"))?;
    Ok(child.into())
}

fn dump(buffers: &[Vec<u8>], names: &[String], dir: &Path) -> Result<()> {
    for (buffer, name) in buffers.iter().zip(names) {
        let path = dir.join(format!("buffer-{}.bin", name.replace(['/', ' '], "-")));
        std::fs::File::create(&path)
            .and_then(|mut file| file.write_all(buffer))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Compares `sources` block by block with `reference` until one of them
/// ends, they disagree, or `limit` bytes have been verified.
///
/// `names` labels the reference first, then each source. On mismatch the
/// current block of every stream is dumped into `dump_dir`.
fn verify<R: Read, S: Read>(
    reference: &mut R,
    sources: &mut [S],
    names: &[String],
    limit: Option<usize>,
    dump_dir: &Path,
) -> Result<usize> {
    let mut buffers = vec![vec![0; BUFFER_SIZE]; sources.len() + 1];

    let mut progress = 0usize;
    let mut last_progress = 0usize;
    let mut last_update = Instant::now();

    loop {
        let (expected, actual) = buffers.split_at_mut(1);
        reference.read_exact(&mut expected[0])?;
        for ((source, buffer), name) in sources.iter_mut().zip(actual.iter_mut()).zip(&names[1..]) {
            source
                .read_exact(buffer)
                .wrap_err_with(|| format!("reading from `{name}`"))?;
        }

        if !buffers.iter().all(|buffer| *buffer == buffers[0]) {
            println!("Not all submissions match the reference! Dumping current buffer to files, run `sha256sum buffer-*.bin` to check.");
            dump(&buffers, names, dump_dir)?;
            bail!("mismatch after {progress} verified bytes");
        }

        progress += BUFFER_SIZE;

        if Instant::now() - last_update > Duration::from_secs(1) {
            let progress_gib = (progress as f64) / GIB as f64;
            let rate_gib = (progress - last_progress) as f64 / GIB as f64;
            println!("Verified {:.2} GiB at {:.2} GiB/s", progress_gib, rate_gib);
            last_update = Instant::now();
            last_progress = progress;
        }

        if limit.is_some_and(|limit| progress >= limit) {
            println!("Verified {:.2} GiB, all submissions match", progress as f64 / GIB as f64);
            return Ok(progress);
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut childs = args
        .submissions
        .iter()
        .map(|s| spawn(s))
        .collect::<Result<Vec<_>>>()?;

    let mut stdouts = childs
        .iter_mut()
        .map(|child| child.stdout.take().ok_or_else(|| eyre!("child stdout not piped")))
        .collect::<Result<Vec<ChildStdout>>>()?;

    for (stdout, submission) in stdouts.iter_mut().zip(&args.submissions) {
        seek_to_fizz_start(stdout).wrap_err_with(|| format!("`{submission}`"))?;
    }

    // Everything up to and including "1\n" has been consumed.
    let mut reference = Reference::starting_at(2);

    let mut names = vec!["reference".to_string()];
    names.extend(args.submissions.iter().cloned());

    let limit = args.limit.map(|gib| (gib * GIB as f64) as usize);
    verify(&mut reference, &mut stdouts, &names, limit, Path::new("."))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn seeks_past_preamble() {
        let mut reader = Cursor::new(b"header\nFizzBuzz\n1\n2\nFizz\n".to_vec());
        seek_to_fizz_start(&mut reader).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "2\nFizz\n");
    }

    #[test]
    fn ignores_numbers_starting_with_one() {
        let mut reader = Cursor::new(b"x\n10\n1\n2\n".to_vec());
        seek_to_fizz_start(&mut reader).unwrap();
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "2\n");
    }

    #[test]
    fn missing_start_is_an_error() {
        let mut reader = Cursor::new(b"FizzBuzz\n2\n".to_vec());
        assert!(seek_to_fizz_start(&mut reader).is_err());
    }

    #[test]
    fn chunked_output_passes_verification() {
        let mut out = Vec::new();
        let chunk = std::num::NonZeroUsize::new(6000).unwrap();
        let length = chunked_fizzbuzz::count::parse_length("60000").unwrap();
        chunked_fizzbuzz::fizzbuzz(chunk, &length, &mut out).unwrap();

        let mut reader = Cursor::new(out);
        seek_to_fizz_start(&mut reader).unwrap();
        let mut actual = vec![0u8; BUFFER_SIZE];
        reader.read_exact(&mut actual).unwrap();

        let mut expected = vec![0u8; BUFFER_SIZE];
        Reference::starting_at(2).read_exact(&mut expected).unwrap();
        assert!(actual == expected);
    }

    fn names(sources: usize) -> Vec<String> {
        let mut names = vec!["reference".to_string()];
        names.extend((0..sources).map(|i| format!("target/fizzbuzz {i}")));
        names
    }

    fn reference_bytes(blocks: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; blocks * BUFFER_SIZE];
        Reference::starting_at(2).read_exact(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn limit_ends_verification_successfully() {
        let dir = tempfile::tempdir().unwrap();
        let mut sources = vec![Cursor::new(reference_bytes(3)), Cursor::new(reference_bytes(3))];

        let verified = verify(
            &mut Reference::starting_at(2),
            &mut sources,
            &names(2),
            Some(2 * BUFFER_SIZE),
            dir.path(),
        )
        .unwrap();

        assert_eq!(verified, 2 * BUFFER_SIZE);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn mismatch_dumps_every_stream_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = reference_bytes(2);
        let mut bad = good.clone();
        bad[BUFFER_SIZE + 100] = b'X';
        let mut sources = vec![Cursor::new(good), Cursor::new(bad.clone())];

        let err = verify(
            &mut Reference::starting_at(2),
            &mut sources,
            &names(2),
            None,
            dir.path(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(&format!("mismatch after {BUFFER_SIZE} verified bytes")));

        let dumped = std::fs::read(dir.path().join("buffer-target-fizzbuzz-1.bin")).unwrap();
        assert!(dumped[..] == bad[BUFFER_SIZE..]);
        assert!(dir.path().join("buffer-reference.bin").exists());
        assert!(dir.path().join("buffer-target-fizzbuzz-0.bin").exists());
    }

    #[test]
    fn short_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sources = vec![Cursor::new(reference_bytes(1))];

        let result = verify(&mut Reference::starting_at(2), &mut sources, &names(1), None, dir.path());
        assert!(result.is_err());
    }
}
