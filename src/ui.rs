use crate::models::TrackerResponse;

pub fn render_index(tracker: &TrackerResponse) -> String {
    INDEX_HTML
        .replace("{{FOOD}}", &tracker.food_calories.to_string())
        .replace("{{EXERCISE}}", &tracker.exercise_calories.to_string())
        .replace("{{NET}}", &tracker.net_balance.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Tracker</title>
  <style>
    :root {
      --lime: #65a30d;
      --lime-light: #84cc16;
      --orange: #f97316;
      --ink: #1f2937;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      font-family: "Trebuchet MS", sans-serif;
      color: var(--ink);
      background: #f1f5f9;
    }

    header {
      background: var(--lime);
      padding: 12px 20px;
    }

    .bar {
      max-width: 900px;
      margin: 0 auto;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      color: white;
      text-transform: uppercase;
      font-size: 1.1rem;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 10px 14px;
      font-weight: 700;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.4;
      pointer-events: none;
    }

    .dark {
      background: var(--ink);
      color: white;
      text-transform: uppercase;
    }

    .form-section {
      background: var(--lime-light);
      padding: 60px 20px;
    }

    form.entry {
      max-width: 900px;
      margin: 0 auto;
      background: white;
      border-radius: 10px;
      padding: 32px;
      display: grid;
      gap: 16px;
    }

    label {
      font-weight: 700;
      display: grid;
      gap: 6px;
    }

    input, select {
      padding: 8px;
      border: 1px solid #cbd5e1;
      border-radius: 8px;
      font: inherit;
    }

    .tracker {
      background: var(--ink);
      color: white;
      padding: 40px 20px;
      text-align: center;
    }

    .totals {
      max-width: 900px;
      margin: 0 auto 24px;
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 16px;
    }

    .totals .value {
      display: block;
      font-size: 2.6rem;
      font-weight: 900;
      color: var(--orange);
    }

    .history {
      background: #15803d;
      color: white;
    }

    .list {
      max-width: 900px;
      margin: 0 auto;
      padding: 40px 20px;
    }

    .list h2 {
      text-align: center;
      color: #475569;
    }

    .card {
      background: white;
      margin-top: 18px;
      padding: 24px;
      display: flex;
      justify-content: space-between;
      box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12);
    }

    .badge {
      display: inline-block;
      padding: 4px 18px;
      color: white;
      text-transform: uppercase;
      font-weight: 700;
    }

    .badge.food {
      background: var(--lime-light);
    }

    .badge.exercise {
      background: var(--orange);
    }

    .card .calories {
      font-size: 2rem;
      font-weight: 900;
      color: var(--lime-light);
    }

    .overlay {
      position: fixed;
      inset: 0;
      margin: auto;
      width: 90%;
      height: 80%;
      background: white;
      border-radius: 10px;
      box-shadow: 0 10px 40px rgba(0, 0, 0, 0.3);
      padding: 16px;
      display: none;
    }

    .overlay.open {
      display: block;
    }

    .overlay .close {
      position: absolute;
      top: 12px;
      right: 12px;
      background: #dc2626;
      color: white;
    }

    #chart {
      width: 100%;
      height: 100%;
    }

    .status {
      color: #b91c1c;
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <header>
    <div class="bar">
      <h1>Calorie Tracker</h1>
      <button class="dark" id="restart" type="button">Restart app</button>
    </div>
  </header>

  <section class="form-section">
    <form class="entry" id="entry">
      <label>Category
        <select id="category"></select>
      </label>
      <label>Activity
        <input id="name" type="text" placeholder="e.g. Salad, Orange juice, Running" />
      </label>
      <label>Calories
        <input id="calories" type="number" min="1" placeholder="e.g. 300" />
      </label>
      <label>Date
        <input id="date" type="date" />
      </label>
      <div class="status" id="status"></div>
      <button class="dark" id="submit" type="submit" disabled>Save food</button>
    </form>
  </section>

  <section class="tracker">
    <div class="totals">
      <div><span class="value" id="food">{{FOOD}}</span>Consumed</div>
      <div><span class="value" id="exercise">{{EXERCISE}}</span>Burned</div>
      <div><span class="value" id="net">{{NET}}</span>Difference</div>
    </div>
    <button class="history" id="show-history" type="button">View history</button>
  </section>

  <section class="list">
    <h2>Food and activities</h2>
    <input id="search" type="search" placeholder="Search activity" />
    <div id="activities"></div>
  </section>

  <div class="overlay" id="summary">
    <button class="close" id="close-summary" type="button">Close</button>
    <svg id="chart" viewBox="0 0 800 400" role="img" aria-label="Calorie history"></svg>
  </div>

  <script>
    const COLORS = ['rgb(211, 113, 33)', 'rgb(75, 192, 192)'];
    const el = (id) => document.getElementById(id);
    let categories = [];
    let state = { activities: [], active_id: '', tracker: {} };

    const today = () => new Date().toISOString().split('T')[0];

    const resetForm = () => {
      el('category').value = categories.length ? categories[0].id : 1;
      el('name').value = '';
      el('calories').value = '';
      el('date').value = today();
      validateForm();
    };

    const validateForm = () => {
      const valid = el('name').value.trim() !== '' && Number(el('calories').value) > 0;
      el('submit').disabled = !valid;
      el('submit').textContent = Number(el('category').value) === 1 ? 'Save food' : 'Save exercise';
    };

    const categoryName = (id) => {
      const found = categories.find((category) => category.id === id);
      return found ? found.name : '';
    };

    const escapeHtml = (text) => String(text).replace(/[&<>"']/g, (c) => `&#${c.charCodeAt(0)};`);

    const renderList = (activities) => {
      const container = el('activities');
      if (!state.activities.length) {
        container.innerHTML = '<p>No activities yet</p>';
        return;
      }
      container.innerHTML = activities.map((activity) => `
        <div class="card">
          <div>
            <span class="badge ${activity.category === 1 ? 'food' : 'exercise'}">${categoryName(activity.category)}</span>
            <p><strong>${escapeHtml(activity.name)}</strong></p>
            <p class="calories">${activity.calories} Calories</p>
            <p>${escapeHtml(activity.date)}</p>
          </div>
          <div>
            <button type="button" data-edit="${escapeHtml(activity.id)}">Edit</button>
            <button type="button" data-delete="${escapeHtml(activity.id)}">Delete</button>
          </div>
        </div>`).join('');
    };

    const applyState = (next) => {
      state = next;
      el('food').textContent = next.tracker.food_calories;
      el('exercise').textContent = next.tracker.exercise_calories;
      el('net').textContent = next.tracker.net_balance;
      el('restart').disabled = next.activities.length === 0;
      el('show-history').disabled = next.activities.length === 0;
      return refreshList();
    };

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const refreshList = async () => {
      const q = encodeURIComponent(el('search').value);
      renderList(await request('GET', `/api/activities?q=${q}`));
    };

    const loadEditing = async () => {
      const activity = await request('GET', '/api/edit');
      if (!activity) {
        return;
      }
      el('category').value = activity.category;
      el('name').value = activity.name;
      el('calories').value = activity.calories;
      el('date').value = activity.date;
      validateForm();
      window.scrollTo({ top: 0, behavior: 'smooth' });
    };

    const renderChart = (chart) => {
      const svg = el('chart');
      const width = 800;
      const height = 400;
      const pad = 50;
      if (!chart.labels.length) {
        svg.innerHTML = '<text x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }
      const max = Math.max(1, ...chart.datasets.flatMap((dataset) => dataset.data));
      const step = chart.labels.length > 1 ? (width - pad * 2) / (chart.labels.length - 1) : 0;
      const x = (index) => pad + index * step;
      const y = (value) => height - pad - (value / max) * (height - pad * 2);

      const lines = chart.datasets.map((dataset, i) => {
        const path = dataset.data
          .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index)} ${y(value)}`)
          .join(' ');
        const points = dataset.data
          .map((value, index) => `<circle cx="${x(index)}" cy="${y(value)}" r="5" fill="${COLORS[i % COLORS.length]}" />`)
          .join('');
        const legend = `<text x="${pad + i * 220}" y="24" fill="${COLORS[i % COLORS.length]}">${escapeHtml(dataset.label)}</text>`;
        return `<path d="${path}" fill="none" stroke="${COLORS[i % COLORS.length]}" stroke-width="2" />${points}${legend}`;
      }).join('');

      const labels = chart.labels
        .map((label, index) => `<text x="${x(index)}" y="${height - pad + 20}" text-anchor="middle" font-size="12">${escapeHtml(label)}</text>`)
        .join('');
      const axis = `<line x1="${pad}" y1="${height - pad}" x2="${width - pad}" y2="${height - pad}" stroke="#94a3b8" />
        <text x="${pad - 10}" y="${y(max) + 4}" text-anchor="end" font-size="12">${max}</text>`;

      svg.innerHTML = axis + lines + labels;
    };

    el('entry').addEventListener('submit', (event) => {
      event.preventDefault();
      request('POST', '/api/activities', {
        category: Number(el('category').value),
        name: el('name').value,
        calories: Number(el('calories').value),
        date: el('date').value
      })
        .then((next) => {
          el('status').textContent = '';
          resetForm();
          return applyState(next);
        })
        .catch((err) => { el('status').textContent = err.message; });
    });

    ['category', 'name', 'calories'].forEach((id) => el(id).addEventListener('input', validateForm));
    el('search').addEventListener('input', () => refreshList());

    el('activities').addEventListener('click', (event) => {
      const { edit, delete: remove } = event.target.dataset;
      if (edit) {
        request('POST', `/api/activities/${encodeURIComponent(edit)}/edit`)
          .then(applyState)
          .then(loadEditing);
      } else if (remove) {
        request('DELETE', `/api/activities/${encodeURIComponent(remove)}`).then(applyState);
      }
    });

    el('restart').addEventListener('click', () => {
      request('POST', '/api/restart').then((next) => {
        resetForm();
        return applyState(next);
      });
    });

    el('show-history').addEventListener('click', () => {
      request('GET', '/api/summary').then((chart) => {
        renderChart(chart);
        el('summary').classList.add('open');
      });
    });

    el('close-summary').addEventListener('click', () => el('summary').classList.remove('open'));

    Promise.all([request('GET', '/api/categories'), request('GET', '/api/state')])
      .then(([loaded, next]) => {
        categories = loaded;
        el('category').innerHTML = categories
          .map((category) => `<option value="${category.id}">${category.name}</option>`)
          .join('');
        resetForm();
        return applyState(next);
      })
      .catch((err) => { el('status').textContent = err.message; });
  </script>
</body>
</html>
"##;
