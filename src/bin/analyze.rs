//! Offline track analyzer
//!
//! Usage:
//!   analyze [--jobs N] [--json] <file1> <file2> ...
//!
//! Decodes each file with symphonia, runs the analysis pipeline, and prints
//! a one-line summary per file (or one JSON object per line with --json).
//! Files are analyzed in parallel; each analysis is single-threaded.

use rayon::prelude::*;
use remix_dsp::{analyze, AnalysisConfig, AnalysisOutcome, AudioSignal};
use std::env;
use std::fs::File;
use std::time::Instant;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::get_probe;

/// Decodes an audio file into per-channel f32 samples.
///
/// Channels are kept separate; the analyzer reads channel 0 as the
/// reference channel.
fn decode_audio_file(path: &str) -> Result<AudioSignal, Box<dyn std::error::Error>> {
    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = std::path::Path::new(path).extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = get_probe().format(&hint, mss, &fmt_opts, &meta_opts)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or("No supported audio tracks found")?;

    let track_id = track.id;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let mut channels: Vec<Vec<f32>> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let channel_count = decoded.spec().channels.count();
                if channels.len() < channel_count {
                    channels.resize(channel_count, Vec::new());
                }

                match decoded {
                    AudioBufferRef::F32(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(buf.chan(ch).iter().copied());
                        }
                    }
                    AudioBufferRef::F64(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(buf.chan(ch).iter().map(|&s| s as f32));
                        }
                    }
                    AudioBufferRef::S16(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(buf.chan(ch).iter().map(|&s| s as f32 / 32768.0));
                        }
                    }
                    AudioBufferRef::S24(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(
                                buf.chan(ch).iter().map(|&s| s.inner() as f32 / 8388608.0),
                            );
                        }
                    }
                    AudioBufferRef::S32(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(buf.chan(ch).iter().map(|&s| s as f32 / 2147483648.0));
                        }
                    }
                    AudioBufferRef::U8(buf) => {
                        for (ch, out) in channels.iter_mut().enumerate().take(channel_count) {
                            out.extend(buf.chan(ch).iter().map(|&s| (s as f32 - 128.0) / 128.0));
                        }
                    }
                    _ => return Err("Unsupported sample format".into()),
                }
            }
            Err(symphonia::core::errors::Error::DecodeError(_)) => {
                // Skip corrupted packets
                continue;
            }
            Err(e) => return Err(Box::new(e)),
        }
    }

    if channels.is_empty() {
        return Err("No audio packets decoded".into());
    }

    Ok(AudioSignal::new(channels, sample_rate)?)
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn percentile(mut xs: Vec<f32>, p: f32) -> Option<f32> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((xs.len() - 1) as f32 * p.clamp(0.0, 1.0)).round() as usize;
    Some(xs[idx.min(xs.len() - 1)])
}

struct FileOutcome {
    path: String,
    outcome: Result<AnalysisOutcome, String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one full analysis as JSON per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .expect("Failed to build rayon thread pool");

    let outs: Vec<FileOutcome> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let outcome = decode_audio_file(path)
                    .map(|signal| analyze(&signal, &config))
                    .map_err(|e| format!("decode failed: {e}"));
                FileOutcome {
                    path: path.clone(),
                    outcome,
                }
            })
            .collect()
    });

    let mut failed = 0usize;
    for (idx, out) in outs.iter().enumerate() {
        match &out.outcome {
            Ok(outcome) => {
                let analysis = outcome.analysis();
                if json {
                    let degraded = match outcome {
                        AnalysisOutcome::Degraded { reason, .. } => Some(reason.as_str()),
                        AnalysisOutcome::Complete(_) => None,
                    };
                    println!(
                        "{}",
                        serde_json::to_string(&serde_json::json!({
                            "file": out.path,
                            "degraded": degraded,
                            "analysis": analysis,
                        }))?
                    );
                } else {
                    let tag = if outcome.is_degraded() {
                        " [fallback]"
                    } else {
                        ""
                    };
                    println!(
                        "[{}/{}] {}: {} BPM (conf={:.2}) Key={} swing={:+.2} sections={} transients={} time={:.1}ms{}",
                        idx + 1,
                        outs.len(),
                        out.path,
                        analysis.tempo.bpm,
                        analysis.tempo.confidence,
                        analysis.key.name(),
                        analysis.groove.swing_factor,
                        analysis.sections.len(),
                        analysis.transients.len(),
                        analysis.metadata.processing_time_ms,
                        tag
                    );
                }
            }
            Err(e) => {
                failed += 1;
                if json {
                    println!(
                        "{}",
                        serde_json::to_string(&serde_json::json!({
                            "file": out.path,
                            "error": e,
                        }))?
                    );
                } else {
                    println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), out.path, e);
                }
            }
        }
    }

    let ok_times: Vec<f32> = outs
        .iter()
        .filter_map(|o| o.outcome.as_ref().ok())
        .map(|outcome| outcome.analysis().metadata.processing_time_ms)
        .collect();
    let wall_ms = t0.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        outs.len() - failed,
        outs.len(),
        wall_ms
    );
    if !ok_times.is_empty() {
        let mean = ok_times.iter().sum::<f32>() / ok_times.len() as f32;
        let p50 = percentile(ok_times.clone(), 0.50).unwrap_or(mean);
        let p90 = percentile(ok_times.clone(), 0.90).unwrap_or(mean);
        eprintln!(
            "processing_time_ms: mean={:.2} p50={:.2} p90={:.2}",
            mean, p50, p90
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
