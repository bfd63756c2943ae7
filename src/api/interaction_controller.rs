use crate::interaction::{CanvasOffset, locate, page_to_canvas};
use crate::render::Renderer;

use super::{ChartEngine, CursorEvent, TooltipValue};

impl<R: Renderer> ChartEngine<R> {
    /// Tracks the pointer over the main chart. Leaving the plot area counts as
    /// a regular (debounced) leave.
    pub fn on_pointer_move(&mut self, page_x: f64, page_y: f64, offset: CanvasOffset) {
        let (canvas_x, canvas_y) =
            page_to_canvas(page_x, page_y, offset, self.config.device_pixel_ratio);
        let width = f64::from(self.main.surface().width);
        if !(0.0..=width).contains(&canvas_x)
            || !(0.0..=self.main.bottom_line()).contains(&canvas_y)
        {
            self.on_pointer_leave(false);
            return;
        }

        let (Some(data_x), Some(visible)) =
            (self.main.canvas_to_x(canvas_x), self.main.range_indexes())
        else {
            return;
        };
        let Some(index) = locate(self.data.x_axis(), data_x, visible) else {
            return;
        };
        let Some(target_x) = self.main.x_to_canvas(self.data.x_axis()[index]) else {
            return;
        };

        let update = self.cursor.on_pointer_move(index, target_x);
        if update.needs_redraw() {
            self.main.request_cursor();
        }
        if update.shown || update.index_changed {
            let event = self.cursor_moved_event(index, target_x);
            self.channels.cursor_events.send(event);
        }
    }

    /// Pointer left the main chart; `force` skips the exit delay.
    pub fn on_pointer_leave(&mut self, force: bool) {
        let update = self.cursor.on_pointer_leave(force);
        if update.hidden {
            self.main.request_cursor();
            self.channels.cursor_events.send(CursorEvent::Hidden);
        }
    }

    /// Tooltip notifications since the last call, oldest first.
    pub fn drain_cursor_events(&mut self) -> Vec<CursorEvent> {
        self.channels.cursor_events.drain()
    }

    pub(super) fn tick_cursor(&mut self, delta_ms: f64) {
        // Keep the cursor on its data point while the horizontal scale moves.
        if self.main.pending_dirty().redraw_chart_needed() {
            if let Some(index) = self.cursor.index() {
                if let Some(x) = self.main.x_to_canvas(self.data.x_axis()[index]) {
                    self.cursor.retarget(x);
                }
                self.main.request_cursor();
            }
        }

        let update = self.cursor.tick(delta_ms);
        if update.needs_redraw() {
            self.main.request_cursor();
        }
        if update.hidden {
            self.channels.cursor_events.send(CursorEvent::Hidden);
        }
    }

    fn cursor_moved_event(&self, index: usize, canvas_x: f64) -> CursorEvent {
        let values = self
            .data
            .series()
            .iter()
            .filter(|column| {
                self.main
                    .series_state(column.id)
                    .is_some_and(|state| state.visible())
            })
            .filter_map(|column| {
                column.values.get(index).map(|value| TooltipValue {
                    series: column.id,
                    name: column.name.clone(),
                    color: column.color,
                    value: *value,
                })
            })
            .collect();
        CursorEvent::Moved {
            index,
            x: self.data.x_axis()[index],
            canvas_x,
            values,
        }
    }
}
