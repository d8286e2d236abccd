use crate::theme::Theme;

pub fn render_index(date: &str, theme: Theme) -> String {
    let theme_class = match theme {
        Theme::Dark => "dark",
        Theme::Light => "",
    };
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{THEME_CLASS}}", theme_class)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --muted: #6f6a63;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --done: #3c9d5d;
      --card: #ffffff;
      --line: rgba(47, 72, 88, 0.12);
    }

    body.dark {
      --bg: #171a1f;
      --ink: #ece8e1;
      --muted: #9b968e;
      --accent-2: #8fb3c7;
      --card: #242830;
      --line: rgba(236, 232, 225, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 28px 16px 48px;
    }

    main {
      width: min(920px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      font-family: Georgia, serif;
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    section {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 20px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 12px;
    }

    .card {
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px;
      display: grid;
      gap: 8px;
    }

    .card.completed {
      border-color: var(--done);
    }

    .row {
      display: flex;
      gap: 8px;
      align-items: center;
      justify-content: space-between;
    }

    .muted {
      color: var(--muted);
      font-size: 0.9rem;
    }

    button,
    input,
    select,
    textarea {
      font: inherit;
      color: inherit;
      background: transparent;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 6px 10px;
    }

    button {
      cursor: pointer;
    }

    button.primary {
      background: var(--accent-2);
      color: #fff;
      border: none;
    }

    button.on {
      background: var(--done);
      color: #fff;
    }

    .bars {
      display: flex;
      align-items: flex-end;
      gap: 4px;
      height: 90px;
    }

    .bar {
      flex: 1;
      background: var(--line);
      border-radius: 6px 6px 0 0;
      position: relative;
      height: 100%;
      overflow: hidden;
    }

    .bar span {
      position: absolute;
      bottom: 0;
      width: 100%;
      background: var(--accent);
    }

    .labels {
      display: flex;
      gap: 4px;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .labels span {
      flex: 1;
      text-align: center;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
    }

    .status.error {
      color: var(--accent);
    }

    .hidden {
      display: none;
    }
  </style>
</head>
<body class="{{THEME_CLASS}}">
  <main>
    <header>
      <div>
        <h1>Habit Tracker</h1>
        <div class="muted">Today is <span id="today">{{DATE}}</span></div>
      </div>
      <div class="row">
        <button id="theme-toggle" type="button">Toggle theme</button>
        <button id="open-form" class="primary" type="button">Add activity</button>
      </div>
    </header>

    <div id="status" class="status" role="status"></div>

    <section id="form-section" class="hidden">
      <h2 id="form-title">Add new activity</h2>
      <form id="activity-form" class="grid">
        <input id="name" placeholder="Activity name" required />
        <select id="type">
          <option value="boolean">Done / not done</option>
          <option value="quantity">Quantity</option>
        </select>
        <select id="count-type">
          <option value="count-if-done">Count if done</option>
          <option value="count-if-not-done">Count if not done</option>
        </select>
        <input id="goal" type="number" min="0" placeholder="Goal (optional)" />
        <div class="row">
          <button class="primary" type="submit" id="submit">Save</button>
          <button type="button" id="close-form">Cancel</button>
        </div>
      </form>
    </section>

    <section>
      <h2>Activities</h2>
      <div id="activity-list" class="grid"></div>
      <p id="no-activities" class="muted hidden">No activities yet.</p>
    </section>

    <section>
      <h2>Today</h2>
      <div id="today-list" class="grid"></div>
    </section>

    <section>
      <h2>Streaks</h2>
      <div id="streak-list" class="grid"></div>
    </section>

    <section>
      <h2>Last 7 days</h2>
      <div id="charts" class="grid"></div>
    </section>

    <section>
      <h2>History</h2>
      <div id="history-list"></div>
    </section>
  </main>

  <dialog id="confirm-delete">
    <p>Delete this activity and all of its history?</p>
    <div class="row">
      <button id="confirm-yes" class="primary" type="button">Delete</button>
      <button id="confirm-no" type="button">Cancel</button>
    </div>
  </dialog>

  <script>
    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    let editingId = null;
    let pendingDelete = null;

    const escape = (text) =>
      String(text).replace(/[&<>"']/g, (c) => `&#${c.charCodeAt(0)};`);

    const setStatus = (text, tone) => {
      statusEl.textContent = text;
      statusEl.className = `status ${tone || ''}`;
    };

    const api = async (path, method = 'GET', body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const renderActivities = (activities) => {
      $('no-activities').classList.toggle('hidden', activities.length > 0);
      $('activity-list').innerHTML = activities
        .map(
          (a) => `<div class="card">
            <strong>${escape(a.name)}</strong>
            <span class="muted">Type: ${a.type} | Goal: ${a.goal || 'None'}</span>
            <div class="row">
              <button data-edit="${a.id}" type="button">Edit</button>
              <button data-delete="${a.id}" type="button">Delete</button>
            </div>
          </div>`
        )
        .join('');
      document.querySelectorAll('[data-edit]').forEach((button) => {
        const activity = activities.find((a) => String(a.id) === button.dataset.edit);
        button.addEventListener('click', () => openForm(activity));
      });
      document.querySelectorAll('[data-delete]').forEach((button) => {
        button.addEventListener('click', () => {
          pendingDelete = button.dataset.delete;
          $('confirm-delete').showModal();
        });
      });
    };

    const renderToday = (today) => {
      $('today').textContent = today.date;
      $('today-list').innerHTML = today.entries
        .map((e) => {
          const control =
            e.kind === 'boolean'
              ? `<button data-toggle="${e.id}" class="${e.value ? 'on' : ''}" type="button">&#10003;</button>`
              : `<div class="row">
                  <input id="qty-${e.id}" type="number" min="0" value="${e.value}" />
                  <button data-qty="${e.id}" class="primary" type="button">Save</button>
                </div>`;
          const goal =
            e.kind === 'quantity' && e.goal > 0
              ? `<span class="muted">Goal: ${e.goal}${e.goal_met ? ' (Met!)' : ''}</span>`
              : '';
          return `<div class="card ${e.completed ? 'completed' : ''}">
            <div class="row"><strong>${escape(e.name)}</strong>${e.kind === 'boolean' ? control : ''}</div>
            ${goal}
            ${e.kind === 'quantity' ? control : ''}
            <textarea id="notes-${e.id}" data-notes="${e.id}" rows="2" placeholder="Notes for today">${escape(e.notes)}</textarea>
          </div>`;
        })
        .join('');

      const notesFor = (id) => $(`notes-${id}`).value;
      document.querySelectorAll('[data-toggle]').forEach((button) => {
        const id = button.dataset.toggle;
        button.addEventListener('click', () =>
          run(api(`/api/activities/${id}/toggle`, 'POST', { notes: notesFor(id) }))
        );
      });
      document.querySelectorAll('[data-qty]').forEach((button) => {
        const id = button.dataset.qty;
        const input = $(`qty-${id}`);
        const previous = input.value;
        button.addEventListener('click', () =>
          api(`/api/activities/${id}/today`, 'POST', { value: input.value, notes: notesFor(id) })
            .then(refresh)
            .catch((err) => {
              input.value = previous;
              setStatus(err.message, 'error');
            })
        );
      });
      document.querySelectorAll('[data-notes]').forEach((area) => {
        area.addEventListener('blur', () =>
          api(`/api/activities/${area.dataset.notes}/notes`, 'POST', { notes: area.value })
            .then(loadHistory)
            .catch((err) => setStatus(err.message, 'error'))
        );
      });
    };

    const renderStreaks = (streaks) => {
      $('streak-list').innerHTML = streaks
        .map(
          (s) => `<div class="card">
            <span class="muted">${escape(s.name)}</span>
            <strong>${s.current_streak} day streak</strong>
            <span class="muted">Record: ${s.longest_streak} days</span>
          </div>`
        )
        .join('');
    };

    const renderCharts = (stats) => {
      $('charts').innerHTML = stats.activities
        .map(
          (a) => `<div class="card">
            <strong>${escape(a.name)}</strong>
            <div class="bars">${a.last_7_days
              .map((d) => `<div class="bar" title="${d.date}: ${d.value}"><span style="height:${d.height_percent}%"></span></div>`)
              .join('')}</div>
            <div class="labels">${a.last_7_days.map((d) => `<span>${d.weekday}</span>`).join('')}</div>
          </div>`
        )
        .join('');
    };

    const renderHistory = (history) => {
      $('history-list').innerHTML = history
        .map(
          (h) => `<h3>${escape(h.name)}</h3>${h.entries
            .map(
              (e) => `<div class="card">
                <div class="row"><span class="muted">${e.date}</span><strong>${escape(e.status)}</strong></div>
                ${e.notes ? `<em class="muted">${escape(e.notes)}</em>` : ''}
              </div>`
            )
            .join('')}`
        )
        .join('');
    };

    const loadHistory = async () => renderHistory(await api('/api/history'));

    const refresh = async () => {
      const today = await api('/api/today');
      const [activities, streaks, stats] = await Promise.all([
        api('/api/activities'),
        api('/api/streaks'),
        api('/api/stats')
      ]);
      renderActivities(activities);
      renderToday(today);
      renderStreaks(streaks);
      renderCharts(stats);
      await loadHistory();
    };

    const run = (promise) =>
      promise
        .then(refresh)
        .then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));

    const openForm = (activity) => {
      editingId = activity ? activity.id : null;
      $('form-title').textContent = activity ? 'Edit activity' : 'Add new activity';
      $('name').value = activity ? activity.name : '';
      $('type').value = activity ? activity.type : 'boolean';
      $('count-type').value = activity ? activity.countType : 'count-if-done';
      $('goal').value = activity && activity.goal ? activity.goal : '';
      $('form-section').classList.remove('hidden');
      $('open-form').classList.add('hidden');
    };

    const closeForm = () => {
      editingId = null;
      $('activity-form').reset();
      $('form-section').classList.add('hidden');
      $('open-form').classList.remove('hidden');
    };

    $('open-form').addEventListener('click', () => openForm(null));
    $('close-form').addEventListener('click', closeForm);

    $('activity-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const goal = parseInt($('goal').value, 10);
      const body = {
        name: $('name').value,
        type: $('type').value,
        countType: $('count-type').value,
        goal: Number.isNaN(goal) ? 0 : goal
      };
      const request = editingId
        ? api(`/api/activities/${editingId}`, 'PUT', body)
        : api('/api/activities', 'POST', body);
      run(request.then(closeForm));
    });

    $('confirm-yes').addEventListener('click', () => {
      const id = pendingDelete;
      $('confirm-delete').close();
      run(api(`/api/activities/${id}`, 'DELETE'));
    });
    $('confirm-no').addEventListener('click', () => $('confirm-delete').close());

    $('theme-toggle').addEventListener('click', () => {
      const dark = document.body.classList.toggle('dark');
      api('/api/theme', 'POST', { theme: dark ? 'dark' : 'light' }).catch((err) =>
        setStatus(err.message, 'error')
      );
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
