pub fn render_index(year: i32) -> String {
    INDEX_HTML.replace("{{YEAR}}", &year.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Registro de ausencias {{YEAR}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f6fb;
      --bg-2: #d9e4f5;
      --ink: #22304a;
      --muted: rgba(34, 48, 74, 0.62);
      --accent: #3b6fd4;
      --danger: #d44a3b;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(34, 48, 74, 0.14);
      --vac: #3b6fd4;
      --fam: #2f9e73;
      --perm: #c98a1d;
      --inc: #d44a3b;
      --otro: #7a6fd4;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef3fb 60%, #f7f9fd 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
      display: grid;
      justify-content: center;
    }

    .app {
      width: min(1100px, 96vw);
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      flex-wrap: wrap;
      gap: 8px;
    }

    h1 {
      font-family: "Fraunces", serif;
      font-size: 2rem;
      margin: 0;
    }

    .muted { color: var(--muted); font-size: 0.9rem; }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .columns {
      display: grid;
      grid-template-columns: 320px 1fr;
      gap: 20px;
      align-items: start;
    }

    @media (max-width: 900px) {
      .columns { grid-template-columns: 1fr; }
    }

    form { display: grid; gap: 10px; }

    label { font-size: 0.82rem; color: var(--muted); display: grid; gap: 4px; }

    input, select, textarea {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(34, 48, 74, 0.18);
      background: #fff;
      color: var(--ink);
    }

    .btn {
      font: inherit;
      border: none;
      border-radius: 12px;
      padding: 9px 14px;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
      font-weight: 600;
    }

    .btn.secondary { background: rgba(34, 48, 74, 0.08); color: var(--ink); }
    .btn.danger { background: var(--danger); }
    .btn:disabled { opacity: 0.5; cursor: wait; }

    #alert { min-height: 1.2em; font-size: 0.86rem; }
    #alert.error { color: var(--danger); }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 12px;
    }

    .month-nav h2 { margin: 0; font-size: 1.2rem; }

    .weekdays, .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .weekdays div {
      text-align: center;
      font-size: 0.75rem;
      color: var(--muted);
      padding: 4px 0;
    }

    .day {
      min-height: 72px;
      border-radius: 10px;
      background: rgba(255, 255, 255, 0.75);
      border: 1px solid rgba(34, 48, 74, 0.08);
      padding: 4px 6px;
      position: relative;
      overflow: hidden;
    }

    .day.out { opacity: 0.38; }
    .day .num { font-size: 0.78rem; color: var(--muted); }

    .chip {
      font-size: 0.68rem;
      background: rgba(59, 111, 212, 0.12);
      border-radius: 6px;
      padding: 1px 4px;
      margin-top: 2px;
      white-space: nowrap;
      overflow: hidden;
      text-overflow: ellipsis;
    }

    .bar {
      position: absolute;
      left: 0; right: 0; bottom: 0;
      height: 4px;
      background: var(--accent);
    }
    .bar.vac { background: var(--vac); }
    .bar.fam { background: var(--fam); }
    .bar.perm { background: var(--perm); }
    .bar.inc { background: var(--inc); }
    .bar.otro { background: var(--otro); }
    .bar.multi {
      background: linear-gradient(90deg, var(--vac), var(--fam), var(--perm), var(--inc));
    }

    .kpis {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 10px;
      margin-bottom: 12px;
    }

    .kpi {
      background: rgba(59, 111, 212, 0.08);
      border-radius: 14px;
      padding: 10px;
      text-align: center;
    }

    .kpi strong { display: block; font-size: 1.5rem; }

    .bd-row {
      display: flex;
      justify-content: space-between;
      padding: 4px 0;
      font-size: 0.88rem;
    }

    .dot {
      display: inline-block;
      width: 9px; height: 9px;
      border-radius: 50%;
      margin-right: 6px;
      background: var(--otro);
    }
    .dot.vac { background: var(--vac); }
    .dot.fam { background: var(--fam); }
    .dot.perm { background: var(--perm); }
    .dot.inc { background: var(--inc); }

    .entry {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 10px;
      padding: 10px 0;
      border-top: 1px solid rgba(34, 48, 74, 0.08);
    }

    .badge {
      font-size: 0.72rem;
      background: rgba(34, 48, 74, 0.08);
      border-radius: 8px;
      padding: 2px 6px;
    }

    .toolbar { display: flex; gap: 8px; flex-wrap: wrap; align-items: center; }
    .filters { display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 12px; }
  </style>
</head>
<body>
  <div class="app">
    <header>
      <h1>Registro de ausencias {{YEAR}}</h1>
      <div class="toolbar">
        <button class="btn secondary" id="btn-export">Exportar</button>
        <label class="btn secondary" style="display:inline-block">
          Importar<input type="file" id="file-import" accept="application/json" hidden />
        </label>
        <button class="btn danger" id="btn-clear">Vaciar todo</button>
      </div>
    </header>

    <div class="columns">
      <div class="card">
        <form id="entry-form">
          <label>Nombre
            <input name="name" placeholder="Ana Pérez" />
          </label>
          <label>Motivo
            <select name="type">
              <option value="">Selecciona…</option>
              <option>Vacaciones</option>
              <option>Día de la familia</option>
              <option>Permiso</option>
              <option>Incapacidad</option>
              <option>Otro</option>
            </select>
          </label>
          <label>Inicio
            <input type="date" name="start" min="{{YEAR}}-01-01" max="{{YEAR}}-12-31" />
          </label>
          <label>Fin
            <input type="date" name="end" min="{{YEAR}}-01-01" max="{{YEAR}}-12-31" />
          </label>
          <label>Nota
            <input name="note" placeholder="opcional" />
          </label>
          <button class="btn" type="submit">Guardar registro</button>
          <div id="alert"></div>
        </form>

        <div class="kpis">
          <div class="kpi"><strong id="kpi-people">0</strong><span class="muted">personas</span></div>
          <div class="kpi"><strong id="kpi-entries">0</strong><span class="muted">registros</span></div>
          <div class="kpi"><strong id="kpi-days">0</strong><span class="muted">días</span></div>
        </div>
        <div id="breakdown"></div>
      </div>

      <div class="card">
        <div class="month-nav">
          <button class="btn secondary" id="btn-prev">←</button>
          <h2 id="month-title"></h2>
          <button class="btn secondary" id="btn-next">→</button>
        </div>
        <div class="filters">
          <input id="filter-name" placeholder="Filtrar por nombre" />
          <select id="filter-type">
            <option value="">Todos los motivos</option>
            <option>Vacaciones</option>
            <option>Día de la familia</option>
            <option>Permiso</option>
            <option>Incapacidad</option>
            <option>Otro</option>
          </select>
        </div>
        <div class="weekdays" id="weekdays"></div>
        <div class="grid" id="calendar"></div>
        <div id="list-hint" class="muted" style="margin-top:12px"></div>
        <div id="entries-list"></div>
      </div>
    </div>
  </div>

  <script>
    const YEAR = Number('{{YEAR}}');
    const MONTHS = ['Enero','Febrero','Marzo','Abril','Mayo','Junio','Julio',
      'Agosto','Septiembre','Octubre','Noviembre','Diciembre'];
    const TYPE_CLASS = {
      'Vacaciones': 'vac',
      'Día de la familia': 'fam',
      'Permiso': 'perm',
      'Incapacidad': 'inc',
      'Otro': 'otro'
    };

    const state = { month: 1, summary: null, filters: { name: '', type: '' } };

    const el = (id) => document.getElementById(id);
    const pad2 = (n) => String(n).padStart(2, '0');
    const alertBox = el('alert');

    const setAlert = (msg, isError) => {
      alertBox.textContent = msg || '';
      alertBox.className = isError ? 'error' : '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || ('HTTP ' + res.status));
      }
      return res.json();
    };

    const refresh = async () => {
      const params = new URLSearchParams();
      if (state.filters.name) params.set('name', state.filters.name);
      if (state.filters.type) params.set('type', state.filters.type);
      const query = params.toString() ? '?' + params.toString() : '';
      state.summary = await api('/api/month/' + state.month + query);
      render();
    };

    const render = () => {
      const summary = state.summary;
      el('month-title').textContent = MONTHS[state.month - 1] + ' ' + YEAR;
      el('kpi-people').textContent = summary.unique_people;
      el('kpi-entries').textContent = summary.total_entries;
      el('kpi-days').textContent = summary.total_days;
      renderBreakdown(summary.breakdown);
      renderCalendar(summary.entries);
      renderList(summary.entries);
    };

    const renderBreakdown = (rows) => {
      const box = el('breakdown');
      box.innerHTML = '';
      rows.forEach((row) => {
        const div = document.createElement('div');
        div.className = 'bd-row';
        const tag = document.createElement('span');
        const dot = document.createElement('span');
        dot.className = 'dot ' + (TYPE_CLASS[row.label] || 'otro');
        tag.appendChild(dot);
        tag.appendChild(document.createTextNode(row.label));
        const count = document.createElement('span');
        count.className = 'muted';
        count.textContent = row.people + ' pers.';
        div.appendChild(tag);
        div.appendChild(count);
        box.appendChild(div);
      });
    };

    const renderCalendar = (entries) => {
      const weekdays = el('weekdays');
      weekdays.innerHTML = '';
      ['Dom','Lun','Mar','Mié','Jue','Vie','Sáb'].forEach((label) => {
        const div = document.createElement('div');
        div.textContent = label;
        weekdays.appendChild(div);
      });

      const grid = el('calendar');
      grid.innerHTML = '';
      const firstWeekday = new Date(YEAR, state.month - 1, 1).getDay();
      const daysInMonth = new Date(YEAR, state.month, 0).getDate();

      for (let cell = 0; cell < 42; cell++) {
        const dayCell = document.createElement('div');
        dayCell.className = 'day';
        const offset = cell - firstWeekday + 1;
        const inMonth = offset >= 1 && offset <= daysInMonth;
        const date = new Date(YEAR, state.month - 1, offset);
        const iso = date.getFullYear() + '-' + pad2(date.getMonth() + 1) + '-' + pad2(date.getDate());

        const num = document.createElement('div');
        num.className = 'num';
        num.textContent = date.getDate();
        dayCell.appendChild(num);
        if (!inMonth) dayCell.classList.add('out');

        if (iso.startsWith(YEAR + '-')) {
          const dayEntries = entries.filter((e) => e.start <= iso && iso <= e.end);
          dayEntries.slice(0, 2).forEach((e) => {
            const chip = document.createElement('div');
            chip.className = 'chip';
            chip.textContent = e.name + ' · ' + e.type;
            dayCell.appendChild(chip);
          });
          if (dayEntries.length > 2) {
            const more = document.createElement('div');
            more.className = 'chip';
            more.textContent = '+' + (dayEntries.length - 2) + ' más';
            dayCell.appendChild(more);
          }
          if (dayEntries.length) {
            const bar = document.createElement('div');
            const kinds = new Set(dayEntries.map((e) => TYPE_CLASS[e.type] || 'otro'));
            bar.className = 'bar ' + (kinds.size === 1 ? [...kinds][0] : 'multi');
            dayCell.appendChild(bar);
            dayCell.title = dayEntries
              .map((e) => e.name + ' (' + e.type + ') ' + e.start + ' a ' + e.end)
              .join('\n');
          }
        }

        grid.appendChild(dayCell);
      }
    };

    const renderList = (entries) => {
      el('list-hint').textContent = MONTHS[state.month - 1] + ' ' + YEAR +
        ' · ' + entries.length + ' registro(s)';
      const list = el('entries-list');
      list.innerHTML = '';
      entries.forEach((e) => {
        const box = document.createElement('div');
        box.className = 'entry';
        const left = document.createElement('div');
        const title = document.createElement('div');
        const strong = document.createElement('strong');
        strong.textContent = e.name + ' ';
        const badge = document.createElement('span');
        badge.className = 'badge';
        badge.textContent = e.type;
        title.appendChild(strong);
        title.appendChild(badge);
        const meta = document.createElement('div');
        meta.className = 'muted';
        meta.textContent = e.start + ' a ' + e.end + (e.note ? ' · ' + e.note : '');
        left.appendChild(title);
        left.appendChild(meta);
        const del = document.createElement('button');
        del.className = 'btn danger';
        del.textContent = 'Eliminar';
        del.addEventListener('click', () => removeEntry(e));
        box.appendChild(left);
        box.appendChild(del);
        list.appendChild(box);
      });
    };

    const removeEntry = async (e) => {
      if (!confirm('¿Eliminar el registro de ' + e.name + ' (' + e.start + ' a ' + e.end + ')?')) return;
      try {
        await api('/api/entries/' + encodeURIComponent(e.id), { method: 'DELETE' });
        setAlert('Registro eliminado.');
      } catch (err) {
        setAlert(err.message, true);
      }
      refresh().catch((err) => setAlert(err.message, true));
    };

    el('entry-form').addEventListener('submit', async (ev) => {
      ev.preventDefault();
      setAlert('');
      const data = new FormData(ev.target);
      const body = {
        name: data.get('name') || '',
        type: data.get('type') || '',
        start: data.get('start') || '',
        end: data.get('end') || '',
        note: data.get('note') || ''
      };
      try {
        await api('/api/entries', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(body)
        });
        if (body.start) state.month = Number(body.start.slice(5, 7));
        ev.target.reset();
        setAlert('Registro guardado.');
        await refresh();
      } catch (err) {
        setAlert(err.message, true);
      }
    });

    el('btn-prev').addEventListener('click', () => {
      state.month = state.month === 1 ? 12 : state.month - 1;
      refresh().catch((err) => setAlert(err.message, true));
    });

    el('btn-next').addEventListener('click', () => {
      state.month = state.month === 12 ? 1 : state.month + 1;
      refresh().catch((err) => setAlert(err.message, true));
    });

    el('filter-name').addEventListener('input', (ev) => {
      state.filters.name = ev.target.value;
      refresh().catch((err) => setAlert(err.message, true));
    });

    el('filter-type').addEventListener('change', (ev) => {
      state.filters.type = ev.target.value;
      refresh().catch((err) => setAlert(err.message, true));
    });

    el('btn-export').addEventListener('click', async () => {
      try {
        const payload = await api('/api/export');
        const blob = new Blob([JSON.stringify(payload, null, 2)], { type: 'application/json' });
        const url = URL.createObjectURL(blob);
        const a = document.createElement('a');
        a.href = url;
        a.download = 'timeoff_' + YEAR + '_export.json';
        document.body.appendChild(a);
        a.click();
        a.remove();
        URL.revokeObjectURL(url);
        setAlert('Exportado.');
      } catch (err) {
        setAlert(err.message, true);
      }
    });

    el('file-import').addEventListener('change', async (ev) => {
      const file = ev.target.files && ev.target.files[0];
      if (!file) return;
      try {
        const text = await file.text();
        const result = await api('/api/import', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: text
        });
        setAlert('Importado: ' + result.added + ' nuevos, ' + result.updated +
          ' actualizados, ' + result.skipped + ' omitidos.');
        await refresh();
      } catch (err) {
        setAlert(err.message, true);
      } finally {
        ev.target.value = '';
      }
    });

    el('btn-clear').addEventListener('click', async () => {
      if (!confirm('¿Seguro? Esto borra todos los registros del año.')) return;
      try {
        await api('/api/clear', { method: 'POST' });
        setAlert('Registros eliminados.');
        await refresh();
      } catch (err) {
        setAlert(err.message, true);
      }
    });

    api('/api/entries')
      .then(() => refresh())
      .catch((err) => setAlert(err.message, true));
  </script>
</body>
</html>
"#;
