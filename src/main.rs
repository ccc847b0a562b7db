//! Pulse oximeter firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! # Architecture
//!
//! - Sampling task: produces one RED/IR sample every 10 ms (100 Hz) and sends
//!   it over a bounded channel. In this build the samples come from the
//!   synthetic source; the MAX30102 FIFO reader slots in here.
//! - PPG task: owns the [`PpgMonitor`], runs the pipeline every 25 samples,
//!   times each run with the DWT cycle counter and publishes the result.
//! - Main task: logs the latest reading and profiling data once a second and
//!   blinks the on-board LED as a heartbeat.
//!
//! On a host target the binary runs the same monitor over the synthetic
//! source and prints the readings.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

/// Heart rate of the synthetic demo signal.
const DEMO_HEART_RATE_BPM: u32 = 72;

// =============================================================================
// Firmware (RP2350)
// =============================================================================

#[cfg(target_arch = "arm")]
mod firmware {
    use defmt::info;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::channel::{Channel, Receiver, Sender};
    use embassy_sync::watch::{DynSender, Watch};
    use embassy_time::{Duration, Ticker};
    use ppg_oximeter::config::SAMPLE_RATE_HZ;
    use ppg_oximeter::profiling::{PipelineTiming, cycles_since, read};
    use ppg_oximeter::{PpgMonitor, Reading, Sample};
    use ppg_oximeter::sensor::SyntheticPpg;

    /// Samples buffered between the sampling and PPG tasks (~320 ms at 100 Hz).
    pub const SAMPLE_QUEUE_LEN: usize = 32;

    pub type SampleSender = Sender<'static, CriticalSectionRawMutex, Sample, SAMPLE_QUEUE_LEN>;
    pub type SampleReceiver = Receiver<'static, CriticalSectionRawMutex, Sample, SAMPLE_QUEUE_LEN>;

    /// Sample stream from the sampling task to the PPG task.
    pub static SAMPLES: Channel<CriticalSectionRawMutex, Sample, SAMPLE_QUEUE_LEN> = Channel::new();

    /// Latest reading with the pipeline timing that produced it.
    #[derive(Clone, Copy, defmt::Format)]
    pub struct PpgStatus {
        pub reading: Reading,
        pub timing: PipelineTiming,
    }

    /// Latest PPG status. The PPG task writes, the main task reads.
    pub static STATUS: Watch<CriticalSectionRawMutex, PpgStatus, 2> = Watch::new();

    /// Synthetic sampling task at the sensor's output data rate.
    #[embassy_executor::task]
    pub async fn sampling_task(sender: SampleSender) {
        info!("Sampling task started ({} Hz)", SAMPLE_RATE_HZ);

        let mut source = SyntheticPpg::new(super::DEMO_HEART_RATE_BPM);
        let mut ticker = Ticker::every(Duration::from_hz(SAMPLE_RATE_HZ as u64));
        loop {
            // Blocks when the PPG task falls behind instead of dropping samples
            sender.send(source.next_sample()).await;
            ticker.next().await;
        }
    }

    /// Pipeline task: buffers samples and runs the estimator on every cadence tick.
    #[embassy_executor::task]
    pub async fn ppg_task(
        monitor: &'static mut PpgMonitor,
        receiver: SampleReceiver,
        sender: DynSender<'static, PpgStatus>,
    ) {
        info!("PPG task started");

        let mut timing = PipelineTiming::new();
        loop {
            let sample = receiver.receive().await;

            let start = read();
            let Some(reading) = monitor.push(sample) else {
                continue;
            };
            timing.record(cycles_since(start));

            sender.send(PpgStatus { reading, timing });
        }
    }
}

#[cfg(target_arch = "arm")]
// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-ppg-oximeter"),
    embassy_rp::binary_info::rp_program_description!(c"MAX30102 heart rate and SpO2 monitor"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    use defmt::{info, warn};
    use embassy_rp::gpio::{Level, Output};
    use embassy_time::{Duration, Instant, Timer};
    use ppg_oximeter::PpgMonitor;
    use ppg_oximeter::profiling::{self, CADENCE_PERIOD_US, MemoryStats, calc_load_percent, cycles_to_us, freq_hz};
    use static_cell::ConstStaticCell;

    use crate::firmware::{SAMPLES, STATUS, ppg_task, sampling_task};

    info!("PPG oximeter starting...");

    let p = embassy_rp::init(Default::default());

    // Stock RP2350 clock
    const CPU_FREQ_HZ: u32 = 150_000_000;
    profiling::init(CPU_FREQ_HZ);
    info!("DWT cycle counter initialized at {} MHz", CPU_FREQ_HZ / 1_000_000);

    // On-board LED (GPIO 25) as heartbeat
    let mut led = Output::new(p.PIN_25, Level::Low);

    // Built in place: the monitor is too large to pass through the stack
    static MONITOR: ConstStaticCell<PpgMonitor> = ConstStaticCell::new(PpgMonitor::new());
    let monitor: &'static mut PpgMonitor = MONITOR.take();

    let mem = MemoryStats::collect();
    info!(
        "Monitor: {} bytes static, stack {}% used",
        profiling::MONITOR_SIZE,
        mem.stack_percent()
    );

    let status_sender = STATUS.dyn_sender();
    let Some(mut status_receiver) = STATUS.dyn_receiver() else {
        warn!("No status receiver slot available");
        return;
    };

    spawner.spawn(ppg_task(monitor, SAMPLES.receiver(), status_sender)).unwrap();
    info!("PPG task spawned");
    spawner.spawn(sampling_task(SAMPLES.sender())).unwrap();
    info!("Sampling task spawned");

    let boot = Instant::now();
    loop {
        Timer::after(Duration::from_secs(1)).await;

        match status_receiver.try_get() {
            Some(status) => {
                let reading = status.reading;
                match (reading.heart_rate.get(), reading.spo2.get()) {
                    (Some(hr), Some(spo2)) => info!("HR={} bpm SpO2={}%", hr, spo2),
                    (Some(hr), None) => info!("HR={} bpm SpO2=-- ({})", hr, reading.spo2_rejection),
                    (None, Some(spo2)) => info!("HR=-- ({}) SpO2={}%", reading.hr_rejection, spo2),
                    (None, None) => info!("No reading: {}", reading.hr_rejection),
                }
                info!(
                    "PROFILE: pipeline last={}us max={}us avg={}us runs={} load={}%",
                    cycles_to_us(status.timing.last),
                    cycles_to_us(status.timing.max),
                    cycles_to_us(status.timing.average()),
                    status.timing.runs(),
                    calc_load_percent(status.timing.max, CADENCE_PERIOD_US, freq_hz())
                );
            }
            None => info!("Filling window..."),
        }

        // Toggle LED every second to show the loop is running
        if (boot.elapsed().as_secs()).is_multiple_of(2) {
            led.set_high();
        } else {
            led.set_low();
        }
    }
}

// =============================================================================
// Host Demo
// =============================================================================

#[cfg(not(target_arch = "arm"))]
fn main() {
    use ppg_oximeter::config::{SAMPLE_RATE_HZ, WINDOW_LEN};
    use ppg_oximeter::profiling::MONITOR_SIZE;
    use ppg_oximeter::sensor::SyntheticPpg;
    use ppg_oximeter::{PpgMonitor, Reading};

    const DEMO_SECONDS: usize = 10;

    println!(
        "PPG oximeter host demo: {} bpm synthetic pulse, {} sample window, monitor {} bytes",
        DEMO_HEART_RATE_BPM, WINDOW_LEN, MONITOR_SIZE
    );

    let mut monitor = Box::new(PpgMonitor::new());
    let source = SyntheticPpg::new(DEMO_HEART_RATE_BPM);

    for (n, sample) in source.take(SAMPLE_RATE_HZ * DEMO_SECONDS).enumerate() {
        let Some(reading) = monitor.push(sample) else {
            continue;
        };
        let t_ms = (n + 1) * 1000 / SAMPLE_RATE_HZ;
        println!("t={t_ms:>5} ms  {}", describe(&reading));
    }

    fn describe(reading: &Reading) -> String {
        let hr = match reading.heart_rate.get() {
            Some(hr) => format!("HR={hr:>3} bpm"),
            None => format!("HR=--- ({:?})", reading.hr_rejection),
        };
        let spo2 = match reading.spo2.get() {
            Some(spo2) => format!("SpO2={spo2:>3}%"),
            None => format!("SpO2=--- ({:?})", reading.spo2_rejection),
        };
        format!("{hr}  {spo2}")
    }
}
