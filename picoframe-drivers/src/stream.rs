//! Frame streaming
//!
//! Pixels are expanded from palette indices a few scanlines at a time
//! into a caller-provided buffer, then handed to the bus either by the
//! CPU or by DMA. Both paths send exactly one memory write per frame.

use picoframe_display::Frame;
use picoframe_hal::{DmaPanelBus, PanelBus};

use crate::bus::RAMWR;

/// Whole scanlines that fit in `buf_len` bytes
fn rows_per_chunk(frame: &Frame<'_>, buf_len: usize) -> usize {
    buf_len / (frame.width() * 2)
}

/// Send `frame` one RGB565 pixel per write
pub fn stream_pixels<B: PanelBus>(bus: &mut B, frame: &Frame<'_>) -> Result<(), B::Error> {
    bus.select()?;
    let sent = write_pixels(bus, frame);
    bus.end_transaction(sent)
}

fn write_pixels<B: PanelBus>(bus: &mut B, frame: &Frame<'_>) -> Result<(), B::Error> {
    bus.write_command(RAMWR)?;
    for pixel in frame.pixels() {
        bus.write_data(&pixel.to_be_bytes())?;
    }
    Ok(())
}

/// Send `frame` in chunks of whole scanlines through `buf`
///
/// Falls back to [`stream_pixels`] when `buf` cannot hold a single line.
pub fn stream_blocking<B: PanelBus>(
    bus: &mut B,
    frame: &Frame<'_>,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    if frame.width() == 0 || frame.height() == 0 {
        return Ok(());
    }
    let rows = rows_per_chunk(frame, buf.len());
    if rows == 0 {
        return stream_pixels(bus, frame);
    }

    bus.select()?;
    let sent = write_chunks(bus, frame, rows, buf);
    bus.end_transaction(sent)
}

fn write_chunks<B: PanelBus>(
    bus: &mut B,
    frame: &Frame<'_>,
    rows: usize,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    bus.write_command(RAMWR)?;
    for first_row in (0..frame.height()).step_by(rows) {
        let len = frame.expand_rows(first_row, rows, buf);
        bus.write_data(&buf[..len])?;
    }
    Ok(())
}

/// Send `frame` in chunks of whole scanlines by DMA
///
/// The buffer is refilled only once the previous transfer has finished.
pub fn stream_dma<B: DmaPanelBus>(
    bus: &mut B,
    frame: &Frame<'_>,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    if frame.width() == 0 || frame.height() == 0 {
        return Ok(());
    }
    let rows = rows_per_chunk(frame, buf.len());
    if rows == 0 {
        return stream_pixels(bus, frame);
    }

    bus.select()?;
    let sent = dma_chunks(bus, frame, rows, buf);
    bus.end_transaction(sent)
}

fn dma_chunks<B: DmaPanelBus>(
    bus: &mut B,
    frame: &Frame<'_>,
    rows: usize,
    buf: &mut [u8],
) -> Result<(), B::Error> {
    bus.write_command(RAMWR)?;
    for first_row in (0..frame.height()).step_by(rows) {
        while bus.dma_is_busy() {
            core::hint::spin_loop();
        }
        let len = frame.expand_rows(first_row, rows, buf);
        bus.start_dma(&buf[..len])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::qspi::DmaUnavailable;
    use crate::bus::{QspiPanelBus, SpiPanelBus};
    use picoframe_hal::BusError;
    use crate::mock::{FailingQspi, Log, MockBusError, MockDma, MockQspi, MockSpi, Op};
    use picoframe_display::Palette;

    fn quads(ops: &[Op]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Quad(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_stream_blocking_chunks() {
        let log = Log::new();
        let mut bus = QspiPanelBus::new(MockQspi(log.clone()), log.pin("cs"));
        log.take();

        let palette = Palette::new();
        let cells = [0xFF; 3 * 5];
        let frame = Frame::new(&cells, 3, 5, &palette);
        // two rows per chunk
        let mut buf = [0u8; 14];
        stream_blocking(&mut bus, &frame, &mut buf).unwrap();

        let ops = log.take();
        assert_eq!(ops[1], Op::Single(vec![0x32, 0x00, 0x2C, 0x00]));
        let chunks = quads(&ops);
        assert_eq!(
            chunks.iter().map(Vec::len).collect::<Vec<_>>(),
            [12, 12, 6]
        );
        assert!(chunks.iter().flatten().all(|&b| b == 0xFF));
        assert_eq!(ops.last(), Some(&Op::Pin("cs", true)));
    }

    #[test]
    fn test_stream_blocking_small_buffer_falls_back() {
        let log = Log::new();
        let mut bus = QspiPanelBus::new(MockQspi(log.clone()), log.pin("cs"));
        log.take();

        let palette = Palette::new();
        let cells = [0xE0, 0x03];
        let frame = Frame::new(&cells, 2, 1, &palette);
        let mut buf = [0u8; 3];
        stream_blocking(&mut bus, &frame, &mut buf).unwrap();

        assert_eq!(quads(&log.take()), [vec![0xF8, 0x00], vec![0x00, 0x1F]]);
    }

    #[test]
    fn test_stream_empty_frame_sends_nothing() {
        let log = Log::new();
        let mut bus = QspiPanelBus::new(MockQspi(log.clone()), log.pin("cs"));
        log.take();

        let palette = Palette::new();
        let frame = Frame::new(&[], 0, 0, &palette);
        stream_blocking(&mut bus, &frame, &mut [0u8; 8]).unwrap();
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_stream_pixels_over_spi() {
        let log = Log::new();
        let mut bus = SpiPanelBus::new(
            MockSpi { log: log.clone(), fail: false },
            log.pin("dc"),
            log.pin("cs"),
        );
        log.take();

        let palette = Palette::new();
        let cells = [0xFF, 0x00];
        let frame = Frame::new(&cells, 2, 1, &palette);
        stream_pixels(&mut bus, &frame).unwrap();

        let spi: Vec<_> = log
            .take()
            .into_iter()
            .filter_map(|op| match op {
                Op::Spi(bytes) => Some(bytes),
                _ => None,
            })
            .collect();
        assert_eq!(spi, [vec![0x2C], vec![0xFF, 0xFF], vec![0x00, 0x00]]);
    }

    #[test]
    fn test_stream_dma_waits_between_chunks() {
        let log = Log::new();
        let mut bus = QspiPanelBus::with_dma(
            MockQspi(log.clone()),
            log.pin("cs"),
            MockDma::new(log.clone(), 3),
        );
        log.take();

        let palette = Palette::new();
        let cells = [0x1C; 4 * 4];
        let frame = Frame::new(&cells, 4, 4, &palette);
        let mut buf = [0u8; 16];
        stream_dma(&mut bus, &frame, &mut buf).unwrap();

        let dma: Vec<_> = log
            .take()
            .into_iter()
            .filter_map(|op| match op {
                Op::Dma(bytes) => Some(bytes),
                _ => None,
            })
            .collect();
        assert_eq!(dma.len(), 2);
        assert!(dma.iter().all(|chunk| chunk.len() == 16));
        assert!(!bus.dma_is_busy());
    }

    #[test]
    fn test_failed_spi_stream_releases_cs() {
        let log = Log::new();
        let mut bus = SpiPanelBus::new(
            MockSpi { log: log.clone(), fail: true },
            log.pin("dc"),
            log.pin("cs"),
        );
        log.take();

        let palette = Palette::new();
        let cells = [0xFF; 4];
        let frame = Frame::new(&cells, 2, 2, &palette);
        assert_eq!(
            stream_blocking(&mut bus, &frame, &mut [0u8; 8]),
            Err(BusError::Transfer(MockBusError))
        );
        let cs: Vec<_> = log
            .take()
            .into_iter()
            .filter(|op| matches!(op, Op::Pin("cs", _)))
            .collect();
        assert_eq!(cs, [Op::Pin("cs", false), Op::Pin("cs", true)]);

        assert!(stream_pixels(&mut bus, &frame).is_err());
        assert_eq!(
            log.take().into_iter().filter(|op| matches!(op, Op::Pin("cs", _))).last(),
            Some(Op::Pin("cs", true))
        );
    }

    #[test]
    fn test_failed_qspi_stream_releases_cs() {
        let log = Log::new();
        let mut bus = QspiPanelBus::new(FailingQspi(log.clone()), log.pin("cs"));
        log.take();

        let palette = Palette::new();
        let cells = [0xFF; 4];
        let frame = Frame::new(&cells, 2, 2, &palette);
        assert_eq!(
            stream_blocking(&mut bus, &frame, &mut [0u8; 8]),
            Err(BusError::Transfer(MockBusError))
        );
        assert_eq!(log.take().last(), Some(&Op::Pin("cs", true)));
    }

    #[test]
    fn test_refused_dma_releases_cs() {
        let log = Log::new();
        let mut bus = QspiPanelBus::new(MockQspi(log.clone()), log.pin("cs"));
        log.take();

        let palette = Palette::new();
        let cells = [0x1C; 4];
        let frame = Frame::new(&cells, 2, 2, &palette);
        assert_eq!(
            stream_dma(&mut bus, &frame, &mut [0u8; 8]),
            Err(BusError::Dma(DmaUnavailable))
        );
        let ops = log.take();
        assert_eq!(ops.first(), Some(&Op::Pin("cs", false)));
        assert_eq!(ops.last(), Some(&Op::Pin("cs", true)));
    }
}
